use thiserror::Error;

/// Errors raised while building an engine or validating its inputs.
///
/// Scoring itself never fails; everything here happens at construction time
/// or at the boundary where raw records are turned into typed ones.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid weights: criterion weights must be non-negative and sum to 1.0 (got {sum:.6})")]
    InvalidWeights { sum: f64 },

    #[error("invalid threshold `{name}`: {reason}")]
    InvalidThreshold { name: &'static str, reason: String },

    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl EngineError {
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for EngineError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
