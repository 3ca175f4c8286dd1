//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (roster order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod autopilot;
pub mod catalog;
pub mod collision;
pub mod competitor;
pub mod control;
pub mod kinematics;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use catalog::{Archetype, ArchetypeId, ArchetypeStats, Catalog, DEFAULT_PRESETS};
pub use competitor::{Competitor, Controls, Origin, Status};
pub use control::{AutopilotDriver, ControlContext, ControlSource, HumanInput};
pub use snapshot::{CompetitorView, Overlay, RenderSnapshot};
pub use state::{MatchPhase, MatchState};
pub use tick::{Navigate, TickInput, tick};
