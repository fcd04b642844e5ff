//! Boundary to the generative-text service.
//!
//! Implementations return the model's raw text untouched; parsing belongs to
//! [`crate::design::normalize`].

use async_trait::async_trait;
use thiserror::Error;

/// Classified failure of a single generation request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The service answered with a non-success status or an error payload.
    #[error("Model service error{}: {message}", status_suffix(.status))]
    Api { status: Option<u16>, message: String },

    /// The service answered, but without any usable text.
    #[error("No response content from the model")]
    EmptyResponse,

    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),
}

impl GenerationError {
    /// Message shown to the user in place of the suggestions list.
    pub fn user_message(&self) -> String {
        match self {
            Self::Timeout => "Request timed out. Please try again.".to_string(),
            Self::Transport(_) => {
                "Network error. Please check your internet connection and try again.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Whether resubmitting the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::Transport(_) => true,
            Self::Api { status, .. } => matches!(status, Some(429) | Some(500..=599)),
            Self::EmptyResponse => false,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

/// A remote text generator. One call is exactly one outbound request.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, instruction: &str) -> Result<String, GenerationError>;
}
