//! Chase heuristic for CPU-driven competitors
//!
//! Each tick the CPU picks the nearest live rival, accelerates when it is
//! roughly dead ahead, brakes otherwise, and steers toward it.

use super::competitor::{Competitor, Controls};
use crate::tuning::Tuning;

/// Index of the closest other living competitor
pub fn nearest_rival(me: usize, roster: &[Competitor]) -> Option<usize> {
    let position = roster.get(me)?.position;
    roster
        .iter()
        .enumerate()
        .filter(|(i, c)| *i != me && c.is_alive())
        .min_by(|(_, a), (_, b)| {
            a.position
                .distance(position)
                .partial_cmp(&b.position.distance(position))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
}

/// Decide the inputs for competitor `me` from the current roster
pub fn compute_controls(me: usize, roster: &[Competitor], tuning: &Tuning) -> Controls {
    let Some(driver) = roster.get(me) else {
        return Controls::NONE;
    };

    let Some(target) = nearest_rival(me, roster) else {
        // Nobody left to chase: come to a stop
        return Controls {
            brake: true,
            ..Controls::NONE
        };
    };

    let sight = (roster[target].position - driver.position).normalize_or_zero();
    let heading = driver.heading3();
    let dot = heading.dot(sight);
    let cross_z = heading.cross(sight).z;

    let mut controls = Controls::NONE;
    if driver.speed() > driver.archetype.max_speed() {
        controls.brake = true;
    } else {
        controls.accelerate = dot > 0.0 && cross_z.abs() < tuning.autopilot_ahead_cone;
        controls.brake = !controls.accelerate;
    }

    if cross_z > tuning.autopilot_steer_dead_zone {
        controls.turn_left = true;
    } else if cross_z < -tuning.autopilot_steer_dead_zone {
        controls.turn_right = true;
    }
    controls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::Catalog;
    use crate::sim::competitor::{Origin, Status};
    use glam::{Vec2, Vec3};

    fn cpu(x: f32, y: f32, heading: Vec2) -> Competitor {
        let catalog = Catalog::with_defaults().unwrap();
        Competitor::new(
            "cpu",
            Origin::Autopilot,
            catalog.default_archetype().unwrap().clone(),
            Vec3::new(x, y, 0.0),
            heading,
        )
    }

    #[test]
    fn test_charges_target_dead_ahead() {
        let roster = vec![cpu(0.0, 0.0, Vec2::X), cpu(5.0, 0.0, Vec2::X)];
        let controls = compute_controls(0, &roster, &Tuning::default());
        assert_eq!(
            controls,
            Controls {
                accelerate: true,
                ..Controls::NONE
            }
        );
    }

    #[test]
    fn test_facing_away_does_not_accelerate() {
        let roster = vec![cpu(0.0, 0.0, -Vec2::X), cpu(5.0, 0.0, Vec2::X)];
        let controls = compute_controls(0, &roster, &Tuning::default());
        assert!(!controls.accelerate);
        assert!(controls.brake);
    }

    #[test]
    fn test_steers_toward_target() {
        let tuning = Tuning::default();
        // Target up and to the left of an east-facing car
        let roster = vec![cpu(0.0, 0.0, Vec2::X), cpu(3.0, 3.0, Vec2::X)];
        let controls = compute_controls(0, &roster, &tuning);
        assert!(controls.turn_left && !controls.turn_right);
        // cross ≈ 0.707 is outside the ahead cone
        assert!(!controls.accelerate && controls.brake);

        let roster = vec![cpu(0.0, 0.0, Vec2::X), cpu(3.0, -3.0, Vec2::X)];
        let controls = compute_controls(0, &roster, &tuning);
        assert!(controls.turn_right && !controls.turn_left);
    }

    #[test]
    fn test_no_rival_means_full_brake() {
        let mut roster = vec![cpu(0.0, 0.0, Vec2::X), cpu(5.0, 0.0, Vec2::X)];
        roster[1].status = Status::Dead;
        let controls = compute_controls(0, &roster, &Tuning::default());
        assert_eq!(
            controls,
            Controls {
                brake: true,
                ..Controls::NONE
            }
        );
    }

    #[test]
    fn test_overspeed_brakes_but_still_steers() {
        let mut roster = vec![cpu(0.0, 0.0, Vec2::X), cpu(3.0, 3.0, Vec2::X)];
        roster[0].velocity = Vec3::new(20.0, 0.0, 0.0);
        let controls = compute_controls(0, &roster, &Tuning::default());
        assert!(controls.brake && !controls.accelerate);
        assert!(controls.turn_left);
    }

    #[test]
    fn test_targets_nearest_living_rival() {
        let mut roster = vec![
            cpu(0.0, 0.0, Vec2::X),
            cpu(2.0, 0.0, Vec2::X),
            cpu(0.0, 6.0, Vec2::X),
            cpu(-9.0, 0.0, Vec2::X),
        ];
        assert_eq!(nearest_rival(0, &roster), Some(1));
        roster[1].status = Status::Dead;
        assert_eq!(nearest_rival(0, &roster), Some(2));
    }

    #[test]
    fn test_falling_rival_is_still_a_target() {
        let mut roster = vec![cpu(0.0, 0.0, Vec2::X), cpu(4.0, 0.0, Vec2::X)];
        roster[1].position.z = -3.0;
        assert_eq!(nearest_rival(0, &roster), Some(1));
    }
}
