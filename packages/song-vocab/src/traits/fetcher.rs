//! Page fetching abstraction.

use async_trait::async_trait;
use url::Url;

use crate::error::FetchResult;

/// Downloads a page and returns its HTML.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the body of `url`. Non-success statuses are errors.
    async fn fetch(&self, url: &Url) -> FetchResult<String>;
}
