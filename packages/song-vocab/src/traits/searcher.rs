//! Web search abstraction.
//!
//! Lyric retrieval starts from a handful of candidate URLs. This trait hides
//! the search provider (Google Custom Search in production, a mock in tests).

use async_trait::async_trait;

use crate::error::Result;
use crate::types::SearchHit;

/// Web search provider.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Run `query` and return at most `limit` hits in rank order.
    ///
    /// Transport and API failures map to `PipelineError::SearchUnavailable`.
    /// An empty result set is `Ok(vec![])`, not an error.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>>;
}
