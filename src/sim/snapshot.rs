//! Read-only view of a match for renderers and external consumers
//!
//! A [`RenderSnapshot`] is captured after a tick and owns all of its data,
//! so it can be handed to another thread or serialized as-is.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::catalog::{ArchetypeStats, Color};
use super::competitor::Status;
use super::state::{MatchPhase, MatchState};
use crate::settings::SetupRow;

/// What to draw for one competitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorView {
    pub name: String,
    pub position: Vec3,
    pub heading: Vec2,
    pub status: Status,
    /// Collision radius, doubles as the draw size
    pub size: f32,
    pub color: Color,
    pub is_human: bool,
}

/// Text layer drawn on top of the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Overlay {
    None,
    Title,
    Setup {
        row: SetupRow,
        humans: usize,
        cpus: usize,
        field_size: f32,
    },
    RosterSelect {
        /// 1-based player currently choosing
        player: usize,
        stats: ArchetypeStats,
    },
    /// Whole seconds left before the start
    Countdown(u32),
    Start,
    Finish,
    Winner(String),
    Draw,
}

impl Overlay {
    fn capture(state: &MatchState) -> Self {
        match state.phase {
            MatchPhase::Title => Overlay::Title,
            MatchPhase::Setup => Overlay::Setup {
                row: state.setup.row,
                humans: state.human_count(),
                cpus: state.cpu_count(),
                field_size: state.field_size(),
            },
            MatchPhase::RosterSelect => Overlay::RosterSelect {
                player: state.selection.chosen.len() + 1,
                stats: state.preview_archetype().stats,
            },
            MatchPhase::Countdown => {
                let duration = state.tuning.countdown_duration;
                let elapsed = state.phase_elapsed;
                if elapsed < duration - 1.0 {
                    Overlay::Countdown((duration - elapsed).floor().max(0.0) as u32)
                } else {
                    Overlay::Start
                }
            }
            MatchPhase::Battle | MatchPhase::Record => Overlay::None,
            MatchPhase::Finished => Overlay::Finish,
            MatchPhase::WinnerDisplay => match state.winner() {
                Some(winner) => Overlay::Winner(winner.name.clone()),
                None => Overlay::Draw,
            },
        }
    }

    /// Banner text, empty when nothing is shown
    pub fn text(&self) -> String {
        match self {
            Overlay::None => String::new(),
            Overlay::Title => "BIT CARS".to_string(),
            Overlay::Setup {
                row,
                humans,
                cpus,
                field_size,
            } => format!(
                "[{}] PLAYER NUM {} / CPU NUM {} / FIELD SIZE {}",
                row.as_str(),
                humans,
                cpus,
                field_size
            ),
            Overlay::RosterSelect { player, stats } => format!(
                "PLAYER {} / TORQUE {} / MAX SPEED {} / MASS {}",
                player, stats.torque, stats.max_speed, stats.mass
            ),
            Overlay::Countdown(seconds) => seconds.to_string(),
            Overlay::Start => "START".to_string(),
            Overlay::Finish => "FINISH".to_string(),
            Overlay::Winner(name) => format!("WINNER {name}"),
            Overlay::Draw => "DRAW".to_string(),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub phase: MatchPhase,
    pub time_ticks: u64,
    /// Side length of the square platform
    pub arena_size: f32,
    pub competitors: Vec<CompetitorView>,
    pub overlay: Overlay,
}

impl RenderSnapshot {
    pub fn capture(state: &MatchState) -> Self {
        let competitors = state
            .roster()
            .iter()
            .map(|c| CompetitorView {
                name: c.name.clone(),
                position: c.position,
                heading: c.heading,
                status: c.status,
                size: c.archetype.size(),
                color: c.archetype.color(),
                is_human: c.origin.is_human(),
            })
            .collect();

        Self {
            phase: state.phase,
            time_ticks: state.time_ticks,
            arena_size: state.arena.size,
            competitors,
            overlay: Overlay::capture(state),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::MatchSettings;
    use crate::tuning::Tuning;

    fn state() -> MatchState {
        MatchState::new(MatchSettings::default(), Tuning::default()).unwrap()
    }

    #[test]
    fn test_title_overlay() {
        let snap = RenderSnapshot::capture(&state());
        assert_eq!(snap.phase, MatchPhase::Title);
        assert_eq!(snap.overlay, Overlay::Title);
        assert!(snap.competitors.is_empty());
    }

    #[test]
    fn test_countdown_then_start() {
        let mut state = state();
        state.build_roster();
        state.enter_phase(MatchPhase::Countdown);
        assert_eq!(Overlay::capture(&state), Overlay::Countdown(6));

        state.advance_phase_timer(SIM_DT);
        assert_eq!(Overlay::capture(&state).text(), "5");

        // 4.5 s in: 1.5 left
        while state.phase_elapsed < 4.5 - 1e-3 {
            state.advance_phase_timer(SIM_DT);
        }
        assert_eq!(Overlay::capture(&state), Overlay::Countdown(1));

        // Last second shows the start marker
        while state.phase_elapsed < 5.05 {
            state.advance_phase_timer(SIM_DT);
        }
        assert_eq!(Overlay::capture(&state).text(), "START");
    }

    #[test]
    fn test_winner_and_draw_banners() {
        let mut state = state();
        state.build_roster();
        state.enter_phase(MatchPhase::Finished);
        assert_eq!(Overlay::capture(&state).text(), "FINISH");

        state.enter_phase(MatchPhase::WinnerDisplay);
        assert_eq!(Overlay::capture(&state), Overlay::Draw);

        state.winner = Some(2);
        assert_eq!(Overlay::capture(&state).text(), "WINNER CPU2");
    }

    #[test]
    fn test_competitor_views() {
        let mut state = state();
        state.build_roster();
        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.competitors.len(), 9);
        assert_eq!(snap.arena_size, 20.0);
        assert!(snap.competitors[0].is_human);
        assert!(!snap.competitors[1].is_human);
        assert_eq!(snap.competitors[1].name, "CPU1");
        assert_eq!(snap.competitors[0].size, 1.0);
        assert_eq!(snap.competitors[0].position, state.roster[0].position);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = state();
        state.build_roster();
        let json = RenderSnapshot::capture(&state).to_json().unwrap();
        assert!(json.contains("\"User1\""));
        let back: RenderSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.competitors.len(), 9);
    }
}
