//! Per-competitor motion integration
//!
//! One call advances a single competitor by one tick: either free fall once
//! it has left the platform, or driving inputs followed by friction while it
//! is still over it.

use glam::Vec3;

use super::arena::Arena;
use super::competitor::{Competitor, Status};
use crate::tuning::Tuning;
use crate::{heading_angle, heading_from_angle};

/// Advance one competitor by `dt`
pub fn update(competitor: &mut Competitor, arena: &Arena, tuning: &Tuning, dt: f32) {
    if competitor.status == Status::Dead {
        return;
    }

    if arena.is_over_platform(competitor.position) {
        apply_controls(competitor, tuning, dt);
        apply_friction(competitor, arena, tuning, dt);
    } else {
        // Off the edge: no traction, just gravity
        competitor.velocity.z -= arena.gravity * dt;
    }

    competitor.position += competitor.velocity * dt;

    if competitor.position.z < -tuning.fall_depth {
        competitor.status = Status::Dead;
        log::debug!("{} fell out of the arena", competitor.name);
    }
}

fn apply_controls(competitor: &mut Competitor, tuning: &Tuning, dt: f32) {
    let controls = competitor.controls;
    if controls.accelerate {
        accelerate(competitor, dt);
    }
    if controls.brake {
        brake(competitor, tuning, dt);
    }
    if controls.turn_left {
        turn(competitor, dt);
    }
    if controls.turn_right {
        turn(competitor, -dt);
    }
}

/// Push along the heading unless already at top speed
fn accelerate(competitor: &mut Competitor, dt: f32) {
    // Drifting backward counts as standing still
    let forward_speed = competitor.velocity.dot(competitor.heading3()).max(0.0);
    if forward_speed < competitor.archetype.max_speed() {
        competitor.velocity += competitor.heading3() * (competitor.archetype.drive_accel() * dt);
    }
}

/// Decelerate against the direction of travel, stopping at zero
fn brake(competitor: &mut Competitor, tuning: &Tuning, dt: f32) {
    let speed = competitor.velocity.length();
    if speed > 0.0 {
        let decel = competitor.archetype.drive_accel() * dt * tuning.brake_coefficient;
        if decel >= speed {
            competitor.velocity = Vec3::ZERO;
        } else {
            competitor.velocity -= competitor.velocity / speed * decel;
        }
    }
}

/// Rotate the heading; `signed_dt` > 0 turns left
fn turn(competitor: &mut Competitor, signed_dt: f32) {
    let theta = heading_angle(competitor.heading) + competitor.archetype.turn_rate() * signed_dt;
    competitor.heading = heading_from_angle(theta);
}

/// Sliding friction, substepped so it can never flip the direction of travel
fn apply_friction(competitor: &mut Competitor, arena: &Arena, tuning: &Tuning, dt: f32) {
    let substeps = tuning.friction_substeps.max(1);
    let step_decel = arena.friction_decel() * (dt / substeps as f32);
    for _ in 0..substeps {
        let speed = competitor.velocity.length();
        if speed > tuning.stop_speed {
            competitor.velocity -= competitor.velocity / speed * step_decel;
        }
        if competitor.velocity.length() <= tuning.stop_speed {
            competitor.velocity = Vec3::ZERO;
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::catalog::Catalog;
    use crate::sim::competitor::{Controls, Origin};
    use glam::Vec2;
    use proptest::prelude::*;

    fn arena() -> Arena {
        Arena::new(20.0, 0.75, 9.8)
    }

    fn competitor_at(position: Vec3) -> Competitor {
        let catalog = Catalog::with_defaults().unwrap();
        Competitor::new(
            "test",
            Origin::Autopilot,
            catalog.default_archetype().unwrap().clone(),
            position,
            Vec2::X,
        )
    }

    #[test]
    fn test_slow_vehicle_stops_dead() {
        let mut c = competitor_at(Vec3::ZERO);
        c.velocity = Vec3::new(0.03, 0.04, 0.0);
        update(&mut c, &arena(), &Tuning::default(), SIM_DT);
        assert_eq!(c.velocity, Vec3::ZERO);
        assert_eq!(c.position, Vec3::ZERO);
    }

    #[test]
    fn test_accelerate_from_rest() {
        let mut c = competitor_at(Vec3::ZERO);
        c.controls = Controls {
            accelerate: true,
            ..Controls::NONE
        };
        update(&mut c, &arena(), &Tuning::default(), SIM_DT);
        // 12 m/s² for 0.1 s, minus 0.735 m/s² friction
        assert!((c.velocity.x - (1.2 - 0.735)).abs() < 1e-3);
        assert!(c.velocity.y.abs() < 1e-6);
        assert!(c.position.x > 0.0);
    }

    #[test]
    fn test_accelerate_ignores_backward_drift() {
        let mut c = competitor_at(Vec3::ZERO);
        c.velocity = Vec3::new(-3.0, 0.0, 0.0);
        c.controls.accelerate = true;
        update(&mut c, &arena(), &Tuning::default(), SIM_DT);
        assert!(c.velocity.x > -3.0 + 1.0);
    }

    #[test]
    fn test_accelerate_capped_at_max_speed() {
        let mut c = competitor_at(Vec3::ZERO);
        c.velocity = Vec3::new(12.5, 0.0, 0.0);
        c.controls.accelerate = true;
        update(&mut c, &arena(), &Tuning::default(), SIM_DT);
        assert!(c.velocity.x < 12.5);
    }

    #[test]
    fn test_forward_speed_never_runs_away() {
        let tuning = Tuning::default();
        let arena = Arena::new(1000.0, 0.0, 9.8);
        let mut c = competitor_at(Vec3::ZERO);
        c.controls.accelerate = true;
        let step = c.archetype.drive_accel() * SIM_DT;
        for _ in 0..200 {
            update(&mut c, &arena, &tuning, SIM_DT);
            let forward = c.velocity.dot(c.heading3());
            assert!(forward <= c.archetype.max_speed() + step + 1e-4);
        }
    }

    #[test]
    fn test_brake_never_reverses() {
        let mut c = competitor_at(Vec3::ZERO);
        c.velocity = Vec3::new(0.5, 0.0, 0.0);
        c.controls.brake = true;
        update(&mut c, &arena(), &Tuning::default(), SIM_DT);
        assert_eq!(c.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_brake_slows_along_velocity() {
        let arena = Arena::new(20.0, 0.0, 9.8);
        let mut c = competitor_at(Vec3::ZERO);
        c.velocity = Vec3::new(0.0, 8.0, 0.0);
        c.controls.brake = true;
        update(&mut c, &arena, &Tuning::default(), SIM_DT);
        // 12 m/s² * 0.1 s * 0.6
        assert!((c.velocity.y - (8.0 - 0.72)).abs() < 1e-4);
        assert!(c.velocity.x.abs() < 1e-6);
    }

    #[test]
    fn test_turn_left_then_right_cancels() {
        let mut c = competitor_at(Vec3::ZERO);
        c.heading = heading_from_angle(0.3);
        c.controls.turn_left = true;
        c.controls.turn_right = true;
        update(&mut c, &arena(), &Tuning::default(), SIM_DT);
        assert!((heading_angle(c.heading) - 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_turn_left_rotates_counter_clockwise() {
        let mut c = competitor_at(Vec3::ZERO);
        c.controls.turn_left = true;
        update(&mut c, &arena(), &Tuning::default(), SIM_DT);
        // 5 rad/s for 0.1 s
        assert!((heading_angle(c.heading) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_falls_off_edge_and_dies() {
        let arena = arena();
        let tuning = Tuning::default();
        let mut c = competitor_at(Vec3::new(arena.size, 0.0, 0.0));
        c.controls.accelerate = true;

        let ticks = (tuning.fall_depth / (arena.gravity * SIM_DT)).ceil() as usize;
        for _ in 0..ticks {
            update(&mut c, &arena, &tuning, SIM_DT);
        }
        assert!(c.position.z < -tuning.fall_depth);
        assert_eq!(c.status, Status::Dead);
        // No traction while falling
        assert_eq!(c.velocity.x, 0.0);

        let frozen = (c.position, c.velocity, c.heading);
        update(&mut c, &arena, &tuning, SIM_DT);
        assert_eq!((c.position, c.velocity, c.heading), frozen);
    }

    #[test]
    fn test_airborne_keeps_horizontal_velocity() {
        let arena = arena();
        let mut c = competitor_at(Vec3::new(10.5, 0.0, 0.0));
        c.velocity = Vec3::new(4.0, 0.0, 0.0);
        update(&mut c, &arena, &Tuning::default(), SIM_DT);
        assert_eq!(c.velocity.x, 4.0);
        assert!(c.velocity.z < 0.0);
    }

    proptest! {
        #[test]
        fn prop_heading_stays_unit(
            angle in -10.0f32..10.0,
            left in any::<bool>(),
            right in any::<bool>(),
            ticks in 1usize..50,
        ) {
            let mut c = competitor_at(Vec3::ZERO);
            c.heading = heading_from_angle(angle);
            c.controls = Controls { turn_left: left, turn_right: right, ..Controls::NONE };
            for _ in 0..ticks {
                update(&mut c, &arena(), &Tuning::default(), SIM_DT);
                prop_assert!((c.heading.length() - 1.0).abs() <= 1e-6);
            }
        }

        #[test]
        fn prop_friction_never_flips_direction(
            vx in -15.0f32..15.0,
            vy in -15.0f32..15.0,
        ) {
            let mut c = competitor_at(Vec3::ZERO);
            c.velocity = Vec3::new(vx, vy, 0.0);
            let before = c.velocity;
            update(&mut c, &arena(), &Tuning::default(), SIM_DT);
            prop_assert!(c.velocity == Vec3::ZERO || c.velocity.dot(before) > 0.0);
            prop_assert!(c.velocity.length() <= before.length());
            if c.velocity != Vec3::ZERO {
                prop_assert!(c.velocity.length() > Tuning::default().stop_speed);
            }
        }
    }
}
