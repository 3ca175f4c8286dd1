//! Fixed timestep match controller
//!
//! One call to [`tick`] runs the handler for the current phase. Menu phases
//! react to the edge-triggered confirm / navigate signals; the battle phase
//! runs collisions, drivers and kinematics for every competitor.

use serde::{Deserialize, Serialize};

use super::collision;
use super::competitor::Controls;
use super::control::ControlContext;
use super::kinematics;
use super::state::{MatchPhase, MatchState, wrap_index};
use crate::consts::MAX_HUMANS;

/// Arrow-key style menu navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Navigate {
    Up,
    Down,
    Left,
    Right,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Driving bits per human input slot
    pub players: [Controls; MAX_HUMANS],
    /// Confirm pressed this tick (Enter)
    pub confirm: bool,
    /// Menu navigation pressed this tick
    pub navigate: Option<Navigate>,
}

impl TickInput {
    /// Just a confirm press
    pub fn confirm() -> Self {
        Self {
            confirm: true,
            ..Default::default()
        }
    }

    /// Just a navigation press
    pub fn navigate(direction: Navigate) -> Self {
        Self {
            navigate: Some(direction),
            ..Default::default()
        }
    }

    /// Controls for an input slot (nothing pressed for unknown slots)
    pub fn player(&self, slot: usize) -> Controls {
        self.players.get(slot).copied().unwrap_or_default()
    }

    pub fn set_player(&mut self, slot: usize, controls: Controls) {
        if let Some(entry) = self.players.get_mut(slot) {
            *entry = controls;
        }
    }

    /// Drop the one-shot signals after they have been processed
    pub fn clear_edges(&mut self) {
        self.confirm = false;
        self.navigate = None;
    }
}

/// Advance the match by one fixed timestep
pub fn tick(state: &mut MatchState, input: &TickInput, dt: f32) {
    if state.phase == MatchPhase::Record {
        tick_record(state, input);
        return;
    }
    state.time_ticks += 1;

    match state.phase {
        MatchPhase::Title => tick_title(state, input),
        MatchPhase::Setup => tick_setup(state, input),
        MatchPhase::RosterSelect => tick_roster_select(state, input),
        MatchPhase::Countdown => tick_countdown(state, dt),
        MatchPhase::Battle => tick_battle(state, input, dt),
        MatchPhase::Finished => tick_finished(state, dt),
        MatchPhase::WinnerDisplay => tick_winner_display(state, input),
        MatchPhase::Record => tick_record(state, input),
    }
}

fn tick_title(state: &mut MatchState, input: &TickInput) {
    if input.confirm {
        state.enter_phase(MatchPhase::Setup);
    }
}

fn tick_setup(state: &mut MatchState, input: &TickInput) {
    match input.navigate {
        Some(Navigate::Up) => state.setup.row = state.setup.row.up(),
        Some(Navigate::Down) => state.setup.row = state.setup.row.down(),
        Some(Navigate::Left) => state.setup.cycle(&state.settings, -1),
        Some(Navigate::Right) => state.setup.cycle(&state.settings, 1),
        None => {}
    }

    if !input.confirm {
        return;
    }
    if state.human_count() + state.cpu_count() < 2 {
        log::debug!("Need at least two competitors, staying on setup");
        return;
    }

    state.selection = Default::default();
    if state.human_count() == 0 {
        // CPU-only exhibition: nobody to pick cars
        state.build_roster();
        state.enter_phase(MatchPhase::Countdown);
    } else {
        state.enter_phase(MatchPhase::RosterSelect);
    }
}

fn tick_roster_select(state: &mut MatchState, input: &TickInput) {
    let cars = state.catalog.len();
    match input.navigate {
        Some(Navigate::Left) => {
            state.selection.preview = wrap_index(state.selection.preview, -1, cars);
        }
        Some(Navigate::Right) => {
            state.selection.preview = wrap_index(state.selection.preview, 1, cars);
        }
        Some(Navigate::Up | Navigate::Down) => tick_archetype_details(state, input),
        None => {}
    }

    if !input.confirm {
        return;
    }
    let choice = state.preview_archetype().clone();
    log::debug!(
        "Player {} picked archetype {:?}",
        state.selection.chosen.len() + 1,
        choice.id
    );
    state.selection.chosen.push(choice);
    state.selection.preview = 0;

    if state.selection.chosen.len() >= state.human_count() {
        state.build_roster();
        state.enter_phase(MatchPhase::Countdown);
    }
}

/// Car detail pages are not implemented; the selection screen ignores up/down
fn tick_archetype_details(_state: &mut MatchState, _input: &TickInput) {}

fn tick_countdown(state: &mut MatchState, dt: f32) {
    state.advance_phase_timer(dt);
    if state.phase_elapsed >= state.tuning.countdown_duration {
        state.enter_phase(MatchPhase::Battle);
    }
}

fn tick_battle(state: &mut MatchState, input: &TickInput, dt: f32) {
    collision::resolve_all(&mut state.roster, &state.tuning, &mut state.rng);

    for index in 0..state.roster.len() {
        if !state.roster[index].is_alive() {
            continue;
        }
        let ctx = ControlContext {
            roster: &state.roster,
            index,
            input,
            tuning: &state.tuning,
        };
        let Some(driver) = state.drivers().get(index) else {
            log::warn!("No driver for {}, skipping", state.roster[index].name);
            continue;
        };
        let controls = driver.controls(&ctx);

        let competitor = &mut state.roster[index];
        competitor.controls = controls;
        kinematics::update(competitor, &state.arena, &state.tuning, dt);
    }

    state.alive_count = state.count_alive();
    if state.alive_count <= 1 {
        state.enter_phase(MatchPhase::Finished);
    }
}

fn tick_finished(state: &mut MatchState, dt: f32) {
    state.advance_phase_timer(dt);
    if state.phase_elapsed < state.tuning.finish_hold {
        return;
    }
    if state.alive_count == 1 {
        state.winner = state.roster.iter().position(|c| c.is_alive());
    }
    match state.winner() {
        Some(winner) => log::info!("Winner: {}", winner.name),
        None => log::info!("Draw: nobody left on the platform"),
    }
    state.enter_phase(MatchPhase::WinnerDisplay);
}

fn tick_winner_display(state: &mut MatchState, input: &TickInput) {
    if input.confirm {
        state.reset();
    }
}

/// Match history is not recorded; the screen is inert
fn tick_record(_state: &mut MatchState, _input: &TickInput) {}
