//! Planner errors

use thiserror::Error;

/// Errors surfaced by a planning query
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Collision at start configuration")]
    CollisionAtStart,

    #[error("Collision at goal configuration")]
    CollisionAtGoal,

    #[error("No path found: frontier exhausted before reaching the goal")]
    NoPath,

    #[error("Tree has not been built successfully")]
    NotBuilt,

    #[error("Parent chain did not reach the start after {steps} steps")]
    BrokenChain { steps: usize },

    #[error("Configuration has dimension {actual}, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for planner operations
pub type PlanResult<T> = Result<T, PlanError>;

impl PlanError {
    /// Shorthand for an [`PlanError::InvalidParameter`] error
    pub fn invalid(msg: impl Into<String>) -> Self {
        PlanError::InvalidParameter(msg.into())
    }
}
