//! Physics and autopilot balance constants
//!
//! Keep this separate from match setup (timestep, seed, menu options).
//! Every field has a default so a tuning file only needs the values it changes.

use serde::{Deserialize, Serialize};

use crate::consts::{FALL_DEPTH, STOP_SPEED};
use crate::error::ConfigError;

/// Friction substep range accepted by [`Tuning::validate`]
const FRICTION_SUBSTEPS: std::ops::RangeInclusive<u32> = 20..=10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Scales torque into braking deceleration
    pub brake_coefficient: f32,
    /// Number of substeps friction is split into per tick
    pub friction_substeps: u32,
    /// Speed below which friction stops a vehicle outright
    pub stop_speed: f32,
    /// Depth at which a falling competitor is out
    pub fall_depth: f32,

    /// Softener applied on top of the inverse-distance impulse scale
    pub collision_damping: f32,
    /// Center distance below which a pair is treated as coincident
    pub degenerate_distance: f32,
    /// Upper bound of the random nudge applied to coincident pairs
    pub jitter_magnitude: f32,

    /// |cross| below this means the target is roughly ahead
    pub autopilot_ahead_cone: f32,
    /// |cross| below this means no steering is needed
    pub autopilot_steer_dead_zone: f32,

    /// Countdown length in simulation seconds (last second shows START)
    pub countdown_duration: f32,
    /// How long the FINISH banner holds before the winner screen
    pub finish_hold: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            brake_coefficient: 0.6,
            friction_substeps: 100,
            stop_speed: STOP_SPEED,
            fall_depth: FALL_DEPTH,

            collision_damping: 0.85,
            degenerate_distance: 0.1,
            jitter_magnitude: 0.5,

            autopilot_ahead_cone: 0.5,
            autopilot_steer_dead_zone: 0.1,

            countdown_duration: 6.0,
            finish_hold: 3.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the integrators cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !FRICTION_SUBSTEPS.contains(&self.friction_substeps) {
            return Err(ConfigError::invalid(
                "friction_substeps",
                format!(
                    "need {}..={} substeps, got {}",
                    FRICTION_SUBSTEPS.start(),
                    FRICTION_SUBSTEPS.end(),
                    self.friction_substeps
                ),
            ));
        }
        if self.brake_coefficient < 0.0 {
            return Err(ConfigError::invalid("brake_coefficient", "must not be negative"));
        }
        if self.stop_speed <= 0.0 {
            return Err(ConfigError::invalid("stop_speed", "must be positive"));
        }
        if self.fall_depth <= 0.0 {
            return Err(ConfigError::invalid("fall_depth", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.collision_damping) {
            return Err(ConfigError::invalid("collision_damping", "must be within 0..=1"));
        }
        if self.degenerate_distance <= 0.0 {
            return Err(ConfigError::invalid("degenerate_distance", "must be positive"));
        }
        if !(self.jitter_magnitude >= 0.0 && self.jitter_magnitude.is_finite()) {
            return Err(ConfigError::invalid("jitter_magnitude", "must be finite and not negative"));
        }
        if !(0.0..=1.0).contains(&self.autopilot_ahead_cone) {
            return Err(ConfigError::invalid("autopilot_ahead_cone", "must be within 0..=1"));
        }
        if !(0.0..=1.0).contains(&self.autopilot_steer_dead_zone) {
            return Err(ConfigError::invalid(
                "autopilot_steer_dead_zone",
                "must be within 0..=1",
            ));
        }
        if self.countdown_duration < 1.0 {
            return Err(ConfigError::invalid(
                "countdown_duration",
                "must be at least one second",
            ));
        }
        if self.finish_hold < 0.0 {
            return Err(ConfigError::invalid("finish_hold", "must not be negative"));
        }
        Ok(())
    }
}
