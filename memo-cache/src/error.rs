//! Error types for the memoization cache

use thiserror::Error;

/// Error type for cache lookups and the computations behind them
#[derive(Debug, Error)]
pub enum MemoError {
    /// The input sequence is not acceptable for the computation
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The computation itself failed; nothing was stored for the key
    #[error("Computation failed: {0}")]
    ComputationFailure(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl MemoError {
    /// Wrap any error as a computation failure
    pub fn computation<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        MemoError::ComputationFailure(error.into())
    }

    /// True if this is an `InvalidInput` error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, MemoError::InvalidInput(_))
    }
}
