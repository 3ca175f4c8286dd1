//! Error types for catalog construction and configuration loading

/// Errors raised while building the vehicle catalog
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("archetype id space exhausted (ids {start}..{end} all allocated)")]
    IdSpaceExhausted { start: u32, end: u32 },

    #[error("archetype mass must be positive, got {0}")]
    InvalidMass(f32),

    #[error("catalog has no archetypes")]
    Empty,
}

/// Errors raised while loading tuning or match settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
