//! Centralized error types for Muse.

use thiserror::Error;

use crate::generate::GenerationError;

/// Main error type for Muse operations.
#[derive(Error, Debug)]
pub enum MuseError {
    #[error("Suggestion not found: {0}")]
    SuggestionNotFound(usize),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Result type for Muse operations.
pub type MuseResult<T> = Result<T, MuseError>;

impl MuseError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}
