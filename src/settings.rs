//! Match setup options
//!
//! The option lists drive the setup screen; the remaining fields are fixed
//! for every match started from these settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_FRICTION, GRAVITY, MAX_HUMANS, SIM_DT};
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Setup-screen rows, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SetupRow {
    #[default]
    Humans,
    Cpus,
    FieldSize,
}

impl SetupRow {
    pub const COUNT: usize = 3;

    pub fn index(&self) -> usize {
        match self {
            SetupRow::Humans => 0,
            SetupRow::Cpus => 1,
            SetupRow::FieldSize => 2,
        }
    }

    pub fn from_index(index: usize) -> Self {
        match index % Self::COUNT {
            0 => SetupRow::Humans,
            1 => SetupRow::Cpus,
            _ => SetupRow::FieldSize,
        }
    }

    /// Row above, wrapping from the top to the bottom
    pub fn up(&self) -> Self {
        Self::from_index(self.index() + Self::COUNT - 1)
    }

    /// Row below, wrapping from the bottom to the top
    pub fn down(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SetupRow::Humans => "PLAYER NUM",
            SetupRow::Cpus => "CPU NUM",
            SetupRow::FieldSize => "FIELD SIZE",
        }
    }
}

/// Settings shared by every match of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Simulation seconds per tick
    pub dt: f32,
    /// Seed for the collision jitter RNG
    pub seed: u64,
    /// Platform friction coefficient
    pub friction: f32,
    /// Gravitational acceleration
    pub gravity: f32,

    // === Setup screen choices ===
    /// Selectable human player counts (0 = CPU-only exhibition)
    pub human_options: Vec<usize>,
    /// Selectable CPU counts
    pub cpu_options: Vec<usize>,
    /// Selectable field side lengths
    pub field_options: Vec<f32>,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            dt: SIM_DT,
            seed: 0x5EED,
            friction: FIELD_FRICTION,
            gravity: GRAVITY,

            human_options: vec![1, 2, 3, 4, 0],
            cpu_options: vec![8, 10, 12, 5],
            field_options: vec![20.0, 50.0, 75.0],
        }
    }
}

impl MatchSettings {
    /// Parse settings from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: MatchSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dt <= 0.0 {
            return Err(ConfigError::invalid("dt", "must be positive"));
        }
        if self.gravity <= 0.0 {
            return Err(ConfigError::invalid("gravity", "must be positive"));
        }
        if self.friction < 0.0 {
            return Err(ConfigError::invalid("friction", "must not be negative"));
        }
        if self.human_options.is_empty() {
            return Err(ConfigError::invalid("human_options", "must not be empty"));
        }
        if let Some(n) = self.human_options.iter().find(|&&n| n > MAX_HUMANS) {
            return Err(ConfigError::invalid(
                "human_options",
                format!("at most {MAX_HUMANS} humans can share the keyboard, got {n}"),
            ));
        }
        if self.cpu_options.is_empty() {
            return Err(ConfigError::invalid("cpu_options", "must not be empty"));
        }
        if self.field_options.is_empty() {
            return Err(ConfigError::invalid("field_options", "must not be empty"));
        }
        if self.field_options.iter().any(|&size| size <= 0.0) {
            return Err(ConfigError::invalid("field_options", "sizes must be positive"));
        }
        Ok(())
    }
}

/// Everything a session needs, as loaded from a config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub settings: MatchSettings,
    pub tuning: Tuning,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.settings.validate()?;
        config.tuning.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
