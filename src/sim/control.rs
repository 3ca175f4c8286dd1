//! Where a competitor's inputs come from each tick
//!
//! The match holds one boxed [`ControlSource`] per competitor and asks each
//! of them for controls in roster order, without caring who is behind it.

use std::fmt;

use super::autopilot;
use super::competitor::{Competitor, Controls, Origin};
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Read-only view handed to a control source
#[derive(Clone, Copy)]
pub struct ControlContext<'a> {
    pub roster: &'a [Competitor],
    /// Roster index of the competitor being driven
    pub index: usize,
    pub input: &'a TickInput,
    pub tuning: &'a Tuning,
}

/// Anything that can drive a competitor
pub trait ControlSource: fmt::Debug {
    fn controls(&self, ctx: &ControlContext<'_>) -> Controls;
}

/// Keyboard player: forwards the bits sampled for its input slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanInput {
    pub slot: usize,
}

impl ControlSource for HumanInput {
    fn controls(&self, ctx: &ControlContext<'_>) -> Controls {
        ctx.input.player(self.slot)
    }
}

/// CPU player running the chase heuristic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutopilotDriver;

impl ControlSource for AutopilotDriver {
    fn controls(&self, ctx: &ControlContext<'_>) -> Controls {
        autopilot::compute_controls(ctx.index, ctx.roster, ctx.tuning)
    }
}

/// Pick the control source matching a competitor's origin
pub fn driver_for(origin: Origin) -> Box<dyn ControlSource> {
    match origin {
        Origin::Human { slot } => Box::new(HumanInput { slot }),
        Origin::Autopilot => Box::new(AutopilotDriver),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::Catalog;
    use glam::{Vec2, Vec3};

    fn roster() -> Vec<Competitor> {
        let catalog = Catalog::with_defaults().unwrap();
        let archetype = catalog.default_archetype().unwrap();
        vec![
            Competitor::new(
                "User1",
                Origin::Human { slot: 0 },
                archetype.clone(),
                Vec3::ZERO,
                Vec2::X,
            ),
            Competitor::new(
                "CPU1",
                Origin::Autopilot,
                archetype.clone(),
                Vec3::new(-5.0, 0.0, 0.0),
                Vec2::X,
            ),
        ]
    }

    #[test]
    fn test_human_reads_its_slot() {
        let roster = roster();
        let mut input = TickInput::default();
        input.set_player(0, Controls::from_bits([false, true, true, false]));
        let tuning = Tuning::default();
        let ctx = ControlContext {
            roster: &roster,
            index: 0,
            input: &input,
            tuning: &tuning,
        };
        let driver = driver_for(roster[0].origin);
        assert_eq!(driver.controls(&ctx), Controls::from_bits([false, true, true, false]));
    }

    #[test]
    fn test_autopilot_ignores_keyboard() {
        let roster = roster();
        let mut input = TickInput::default();
        input.set_player(0, Controls::from_bits([false, true, false, false]));
        let tuning = Tuning::default();
        let ctx = ControlContext {
            roster: &roster,
            index: 1,
            input: &input,
            tuning: &tuning,
        };
        let driver = driver_for(roster[1].origin);
        // User1 sits dead ahead of CPU1
        assert!(driver.controls(&ctx).accelerate);
    }
}
