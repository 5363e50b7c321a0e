//! Engine error types.

use thiserror::Error;

use autocut_models::IntervalError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors from cut-decision computation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed interval reached the merger; indicates an upstream bug.
    #[error(transparent)]
    InvalidInterval(#[from] IntervalError),

    /// A custom filler pattern failed to compile.
    #[error("Invalid filler pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
