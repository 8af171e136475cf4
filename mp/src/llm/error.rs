//! LLM error types

use thiserror::Error;

/// Errors that can occur during the generation call
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("The API returned an empty response")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Check whether this looks like an authentication problem
    ///
    /// The provider reports bad keys inconsistently (status codes and
    /// message substrings), so both are matched.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            LlmError::ApiError { status, message } => {
                matches!(status, 401 | 403)
                    || message.contains("API key not valid")
                    || message.contains("API_KEY_INVALID")
                    || message.contains("PERMISSION_DENIED")
            }
            _ => false,
        }
    }

    /// Check whether the service reported itself as overloaded
    pub fn is_overloaded(&self) -> bool {
        match self {
            LlmError::ApiError { status, message } => {
                *status == 503 || message.contains("overloaded") || message.contains("UNAVAILABLE")
            }
            _ => false,
        }
    }
}
