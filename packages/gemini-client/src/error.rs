//! Error types for Gemini client.

use std::time::Duration;

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// The HTTP client could not be built
    #[error("Configuration error: {0}")]
    Config(String),

    /// No response within the client timeout
    #[error("Gemini request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Connection refused, reset, DNS failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response. `message` is `error.message` from Gemini's error
    /// body when present, otherwise the raw body.
    #[error("Gemini API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The prompt was rejected (`promptFeedback.blockReason`)
    #[error("Gemini blocked the prompt: {reason}")]
    Blocked { reason: String },

    /// A 2xx response without any text part
    #[error("Gemini returned no content (finish reason: {})", .finish_reason.as_deref().unwrap_or("none"))]
    NoContent { finish_reason: Option<String> },

    /// Response body did not decode
    #[error("Parse error: {0}")]
    Parse(String),
}
