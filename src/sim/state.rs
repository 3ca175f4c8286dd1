//! Match state and roster lifecycle
//!
//! Everything the match controller mutates between ticks lives here.

use std::f32::consts::TAU;
use std::sync::Arc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::catalog::{Archetype, Catalog};
use super::competitor::{Competitor, Origin, Status};
use super::control::{ControlSource, driver_for};
use crate::error::CatalogError;
use crate::settings::{MatchSettings, SetupRow};
use crate::tuning::Tuning;
use crate::{heading_from_angle, normalize_angle};

/// Current screen / phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Title card, waiting for confirm
    Title,
    /// Player count, CPU count and field size selection
    Setup,
    /// Each human picks a car
    RosterSelect,
    /// Cars on the grid, counting down to the start
    Countdown,
    /// Active battle
    Battle,
    /// Zero or one car left, FINISH banner
    Finished,
    /// Winner (or draw) screen
    WinnerDisplay,
    /// Match history screen (not implemented, never entered by the flow)
    Record,
}

/// Cursor positions on the setup screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupSelection {
    pub row: SetupRow,
    pub humans: usize,
    pub cpus: usize,
    pub field: usize,
}

impl SetupSelection {
    /// Step the option on the current row by `delta` (±1), wrapping
    pub fn cycle(&mut self, settings: &MatchSettings, delta: isize) {
        let (index, len) = match self.row {
            SetupRow::Humans => (&mut self.humans, settings.human_options.len()),
            SetupRow::Cpus => (&mut self.cpus, settings.cpu_options.len()),
            SetupRow::FieldSize => (&mut self.field, settings.field_options.len()),
        };
        *index = wrap_index(*index, delta, len);
    }
}

/// Progress through the car selection screen
#[derive(Debug, Clone, Default)]
pub struct RosterSelection {
    /// Catalog index currently shown
    pub preview: usize,
    /// Cars already confirmed, in player order
    pub chosen: Vec<Arc<Archetype>>,
}

/// Complete match state
#[derive(Debug)]
pub struct MatchState {
    pub settings: MatchSettings,
    pub tuning: Tuning,
    pub catalog: Catalog,
    /// Collision jitter source, seeded from the settings
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: MatchPhase,
    /// Ticks spent in the current timed phase (countdown, finish)
    pub phase_ticks: u32,
    /// Seconds spent in the current timed phase
    pub phase_elapsed: f32,
    pub setup: SetupSelection,
    pub selection: RosterSelection,
    pub arena: Arena,
    /// Competitors in draw order; replaced only through [`MatchState::set_roster`]
    pub(crate) roster: Vec<Competitor>,
    /// One control source per roster entry
    drivers: Vec<Box<dyn ControlSource>>,
    /// Competitors still alive after the last battle tick
    pub alive_count: usize,
    /// Roster index of the sole survivor, once decided
    pub winner: Option<usize>,
    /// Car CPUs drive and selection starts from
    default_archetype: Arc<Archetype>,
}

impl MatchState {
    /// Create a match at the title screen with the stock catalog
    pub fn new(settings: MatchSettings, tuning: Tuning) -> Result<Self, CatalogError> {
        Self::with_catalog(settings, tuning, Catalog::with_defaults()?)
    }

    /// Create a match at the title screen using `catalog`
    pub fn with_catalog(
        settings: MatchSettings,
        tuning: Tuning,
        catalog: Catalog,
    ) -> Result<Self, CatalogError> {
        let default_archetype = catalog
            .default_archetype()
            .cloned()
            .ok_or(CatalogError::Empty)?;
        Ok(Self::fresh(settings, tuning, catalog, default_archetype))
    }

    fn fresh(
        settings: MatchSettings,
        tuning: Tuning,
        catalog: Catalog,
        default_archetype: Arc<Archetype>,
    ) -> Self {
        let field = settings.field_options.first().copied().unwrap_or(0.0);
        let arena = Arena::new(field, settings.friction, settings.gravity);
        Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            tuning,
            catalog,
            time_ticks: 0,
            phase: MatchPhase::Title,
            phase_ticks: 0,
            phase_elapsed: 0.0,
            setup: SetupSelection::default(),
            selection: RosterSelection::default(),
            arena,
            roster: Vec::new(),
            drivers: Vec::new(),
            alive_count: 0,
            winner: None,
            default_archetype,
        }
    }

    /// Throw the whole match away and return to the title screen
    pub fn reset(&mut self) {
        let mut catalog = std::mem::take(&mut self.catalog);
        catalog.reset_names();
        let settings = std::mem::take(&mut self.settings);
        let tuning = std::mem::take(&mut self.tuning);
        let default_archetype = Arc::clone(&self.default_archetype);
        *self = Self::fresh(settings, tuning, catalog, default_archetype);
    }

    /// Human players picked on the setup screen
    pub fn human_count(&self) -> usize {
        option_at(&self.settings.human_options, self.setup.humans).unwrap_or(0)
    }

    /// CPU players picked on the setup screen
    pub fn cpu_count(&self) -> usize {
        option_at(&self.settings.cpu_options, self.setup.cpus).unwrap_or(0)
    }

    /// Field size picked on the setup screen
    pub fn field_size(&self) -> f32 {
        option_at(&self.settings.field_options, self.setup.field).unwrap_or(self.arena.size)
    }

    /// Car currently shown on the selection screen
    pub fn preview_archetype(&self) -> &Arc<Archetype> {
        self.catalog
            .get(self.selection.preview)
            .unwrap_or(&self.default_archetype)
    }

    pub fn default_archetype(&self) -> &Arc<Archetype> {
        &self.default_archetype
    }

    /// Lay out humans then CPUs on the starting ring, all facing the center
    pub fn build_roster(&mut self) {
        let arena = Arena::new(self.field_size(), self.settings.friction, self.settings.gravity);
        let humans = self.human_count();
        let total = humans + self.cpu_count();
        let step = TAU / total.max(1) as f32;

        let mut roster = Vec::with_capacity(total);
        for k in 0..total {
            let theta = normalize_angle(k as f32 * step);
            let dir = heading_from_angle(theta);
            let position = (dir * arena.spawn_radius()).extend(0.0);

            let competitor = if k < humans {
                let archetype = self
                    .selection
                    .chosen
                    .get(k)
                    .cloned()
                    .unwrap_or_else(|| Arc::clone(&self.default_archetype));
                Competitor::new(
                    format!("User{}", k + 1),
                    Origin::Human { slot: k },
                    archetype,
                    position,
                    -dir,
                )
            } else {
                Competitor::new(
                    self.catalog.next_cpu_name(),
                    Origin::Autopilot,
                    Arc::clone(&self.default_archetype),
                    position,
                    -dir,
                )
            };
            log::debug!(
                "Placed {} at ({:.2}, {:.2})",
                competitor.name,
                position.x,
                position.y
            );
            roster.push(competitor);
        }

        log::info!(
            "Match set up: {} humans, {} CPUs, field {}",
            humans,
            total - humans,
            arena.size
        );
        self.set_roster(arena, roster);
    }

    /// Install a roster and matching control sources
    pub fn set_roster(&mut self, arena: Arena, roster: Vec<Competitor>) {
        self.drivers = roster.iter().map(|c| driver_for(c.origin)).collect();
        self.arena = arena;
        self.roster = roster;
        self.alive_count = self.count_alive();
        self.winner = None;
    }

    /// Competitors in draw order
    pub fn roster(&self) -> &[Competitor] {
        &self.roster
    }

    pub fn drivers(&self) -> &[Box<dyn ControlSource>] {
        &self.drivers
    }

    pub fn count_alive(&self) -> usize {
        self.roster
            .iter()
            .filter(|c| c.status == Status::Alive)
            .count()
    }

    /// The sole survivor, if the match produced one
    pub fn winner(&self) -> Option<&Competitor> {
        self.winner.and_then(|i| self.roster.get(i))
    }

    /// Move to another phase, restarting the phase timer
    pub fn enter_phase(&mut self, phase: MatchPhase) {
        log::info!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.phase_ticks = 0;
        self.phase_elapsed = 0.0;
    }

    /// Advance the phase timer by one tick
    pub fn advance_phase_timer(&mut self, dt: f32) {
        self.phase_ticks += 1;
        self.phase_elapsed = self.phase_ticks as f32 * dt;
    }
}

/// Step `index` by `delta` within `0..len`, wrapping at both ends
pub(crate) fn wrap_index(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as isize + delta).rem_euclid(len as isize) as usize
}

fn option_at<T: Copy>(options: &[T], index: usize) -> Option<T> {
    options.get(index).copied()
}
