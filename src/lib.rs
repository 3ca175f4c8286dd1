//! Bit Arena - A sumo-style arena battle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, autopilot, match flow)
//! - `tuning`: Data-driven physics balance
//! - `settings`: Match setup options (timestep, seed, menu choices)

pub mod error;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{CatalogError, ConfigError};
pub use settings::MatchSettings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (10 Hz, one tick per redisplay)
    pub const SIM_DT: f32 = 0.1;

    /// Surface friction coefficient of the platform
    pub const FIELD_FRICTION: f32 = 0.75;
    /// Gravitational acceleration (m/s²)
    pub const GRAVITY: f32 = 9.8;

    /// A competitor below this depth is out of the match
    pub const FALL_DEPTH: f32 = 20.0;
    /// Below this speed friction stops a vehicle outright
    pub const STOP_SPEED: f32 = 0.1;

    /// First archetype id handed out by a catalog
    pub const ARCHETYPE_ID_START: u32 = 500;
    /// Archetype ids must stay below this value
    pub const ARCHETYPE_ID_END: u32 = 600;

    /// Maximum number of human players sharing one keyboard
    pub const MAX_HUMANS: usize = 4;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit heading vector for a polar angle
#[inline]
pub fn heading_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Polar angle of a heading vector
#[inline]
pub fn heading_angle(heading: Vec2) -> f32 {
    heading.y.atan2(heading.x)
}
