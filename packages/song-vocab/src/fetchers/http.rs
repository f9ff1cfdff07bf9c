//! HTTP page fetcher with browser-like headers.
//!
//! Lyric sites routinely refuse obvious bots, so requests carry a desktop
//! browser User-Agent and the usual `Accept` headers. No JavaScript is run.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, UPGRADE_INSECURE_REQUESTS};
use tracing::{debug, warn};
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::traits::PageFetcher;
use crate::types::RetrievalConfig;

/// Fetches pages over HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpFetcher {
    /// Create a fetcher with the default browser User-Agent.
    pub fn new() -> FetchResult<Self> {
        Self::with_user_agent(RetrievalConfig::default().user_agent)
    }

    /// Create a fetcher sending the given User-Agent.
    pub fn with_user_agent(user_agent: impl Into<String>) -> FetchResult<Self> {
        let user_agent = user_agent.into();

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent.as_str())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        Ok(Self { client, user_agent })
    }

    /// Use an existing client (tests, shared pools).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult<String> {
        match url.scheme() {
            "http" | "https" => {}
            _ => {
                return Err(FetchError::InvalidUrl {
                    url: url.to_string(),
                })
            }
        }

        debug!(url = %url, "HTTP fetch starting");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                FetchError::Http(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "HTTP non-success status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        debug!(url = %url, bytes = html.len(), "HTTP fetch complete");
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_agent_is_browser() {
        let fetcher = HttpFetcher::new().unwrap();
        assert!(fetcher.user_agent().starts_with("Mozilla/5.0"));
    }

    #[tokio::test]
    async fn test_rejects_non_http_scheme() {
        let fetcher = HttpFetcher::new().unwrap();
        let url = Url::parse("ftp://lyrics.com/song").unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }
}
