//! Google Custom Search JSON API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{PipelineError, Result};
use crate::security::SecretString;
use crate::traits::WebSearcher;
use crate::types::{SearchHit, MAX_SEARCH_RESULTS};

const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Google Custom Search client
pub struct GoogleSearcher {
    api_key: SecretString,
    engine_id: String,
    client: reqwest::Client,
    endpoint: String,
}

/// Custom Search response; `items` is absent when nothing matched
#[derive(Debug, Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    items: Vec<GoogleItem>,
}

#[derive(Debug, Deserialize)]
struct GoogleItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

impl GoogleSearcher {
    /// Create a client for the given API key and search engine id.
    pub fn new(api_key: impl Into<SecretString>, engine_id: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PipelineError::Config(Box::new(e)))?;

        Ok(Self {
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// Point at a different endpoint (tests, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Decode a response body into hits, skipping items without a link.
    pub fn parse_response(body: &str) -> Result<Vec<SearchHit>> {
        let response: GoogleResponse = serde_json::from_str(body)
            .map_err(|e| PipelineError::SearchUnavailable(Box::new(e)))?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| {
                let link = item.link.filter(|l| !l.trim().is_empty())?;
                Some(SearchHit {
                    url: link,
                    title: item.title,
                })
            })
            .collect())
    }
}

#[async_trait]
impl WebSearcher for GoogleSearcher {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let num = limit.clamp(1, MAX_SEARCH_RESULTS).to_string();

        debug!(query = %query, num = %num, "Searching Google");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.expose()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            // The request URL carries the API key
            .map_err(|e| PipelineError::SearchUnavailable(Box::new(e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::SearchUnavailable(Box::new(e.without_url())))?;

        if !status.is_success() {
            warn!(status = %status, "Google search API error");
            return Err(PipelineError::SearchUnavailable(
                format!("search API returned {}: {}", status, body).into(),
            ));
        }

        let mut hits = Self::parse_response(&body)?;
        hits.truncate(limit);

        debug!(count = hits.len(), "Google search complete");
        Ok(hits)
    }
}
