//! Errors raised at the simulation boundary
//!
//! Everything inside a tick is total; only malformed external input fails.

use thiserror::Error;

/// Rejected call to the tick function. State is never partially applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepError {
    #[error("timestep must be finite and positive, got {0}")]
    InvalidTimestep(f32),
    #[error("input for player '{player}' has non-finite {field}")]
    MalformedInput { player: String, field: &'static str },
}

/// Invalid match setup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("player name must not be empty")]
    EmptyName,
    #[error("duplicate player name '{0}'")]
    DuplicateName(String),
}

/// Tuning could not be loaded or failed validation
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Effect name outside the known catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown effect '{0}'")]
pub struct UnknownEffect(pub String);
