//! Typed errors for the song-vocab pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the agent can map
//! each failure onto the stage that produced it.

use thiserror::Error;

/// Errors surfaced by pipeline stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Search API unreachable, rejected credentials, or returned garbage
    #[error("search unavailable: {0}")]
    SearchUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Search succeeded but returned nothing
    #[error("no search results for: {query}")]
    NoResultsFound { query: String },

    /// Every candidate URL was tried without extracting lyrics
    #[error("no lyrics found after trying {attempted} candidate URLs")]
    NoLyricsFound { attempted: usize },

    /// Language model call failed
    #[error("language model unavailable: {0}")]
    ModelUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Model payload did not match the requested schema
    #[error("malformed model output: {reason}")]
    MalformedModelOutput { reason: String },

    /// Model produced a valid but empty vocabulary list
    #[error("model returned no vocabulary")]
    EmptyVocabulary,

    /// Caller passed unusable input (blank song name, blank lyrics)
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Storage operation failed for a reason other than uniqueness
    #[error("storage error: {0}")]
    StorageFault(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    #[error("config error: {0}")]
    Config(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PipelineError {
    pub(crate) fn storage(e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::StorageFault(e.into())
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedModelOutput {
            reason: reason.into(),
        }
    }
}

/// Errors fetching a single page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// Why one candidate URL produced no lyrics.
///
/// Recovered inside the retrieval loop; never surfaced on its own.
#[derive(Debug, Error)]
pub enum ExtractionFailed {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("no strategy produced lyrics")]
    NoQualifyingText,
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Result type alias for page fetches.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
