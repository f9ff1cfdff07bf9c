//! Testing utilities including mock implementations.
//!
//! Useful for exercising the pipeline without real search, HTTP or LLM
//! calls. Every mock records what it was asked so tests can assert on call
//! order. Clones share state.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use url::Url;

use crate::error::{FetchError, FetchResult, PipelineError, Result};
use crate::traits::{LanguageModel, PageFetcher, WebSearcher};
use crate::types::SearchHit;

/// Mock search engine returning the same hits for every query.
#[derive(Default, Clone)]
pub struct MockWebSearcher {
    hits: Arc<RwLock<Vec<SearchHit>>>,
    failure: Arc<RwLock<Option<String>>>,
    queries: Arc<RwLock<Vec<String>>>,
}

impl MockWebSearcher {
    /// A searcher that finds nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hits(self, hits: Vec<SearchHit>) -> Self {
        *self.hits.write().unwrap() = hits;
        self
    }

    /// Make every search fail with `SearchUnavailable`.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        *self.failure.write().unwrap() = Some(message.into());
        self
    }

    /// Queries received, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        self.queries.write().unwrap().push(query.to_string());

        if let Some(message) = self.failure.read().unwrap().clone() {
            return Err(PipelineError::SearchUnavailable(message.into()));
        }

        Ok(self.hits.read().unwrap().iter().take(limit).cloned().collect())
    }
}

/// Mock fetcher serving canned HTML by URL.
///
/// Unknown URLs answer 404.
#[derive(Default, Clone)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    failures: Arc<RwLock<HashMap<String, u16>>>,
    transport_failures: Arc<RwLock<HashSet<String>>>,
    fetched: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn with_page(self, url: &str, html: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(canonical(url), html.into());
        self
    }

    /// Answer `url` with an HTTP error status.
    pub fn with_failure(self, url: &str, status: u16) -> Self {
        self.failures.write().unwrap().insert(canonical(url), status);
        self
    }

    /// Fail `url` as if the connection dropped.
    pub fn with_transport_failure(self, url: &str) -> Self {
        self.transport_failures.write().unwrap().insert(canonical(url));
        self
    }

    /// URLs fetched, in order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.read().unwrap().clone()
    }
}

fn canonical(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult<String> {
        let key = url.to_string();
        self.fetched.write().unwrap().push(key.clone());

        if self.transport_failures.read().unwrap().contains(&key) {
            return Err(FetchError::Http("connection reset".into()));
        }
        if let Some(status) = self.failures.read().unwrap().get(&key) {
            return Err(FetchError::Status {
                url: key,
                status: *status,
            });
        }
        match self.pages.read().unwrap().get(&key) {
            Some(html) => Ok(html.clone()),
            None => Err(FetchError::Status {
                url: key,
                status: 404,
            }),
        }
    }
}

/// Record of a call made to the mock model.
#[derive(Debug, Clone)]
pub struct ModelCall {
    pub prompt: String,
    pub schema: Option<Value>,
}

/// Mock language model with a canned response.
#[derive(Default, Clone)]
pub struct MockLanguageModel {
    response: Arc<RwLock<Option<String>>>,
    failure: Arc<RwLock<Option<String>>>,
    calls: Arc<RwLock<Vec<ModelCall>>>,
}

impl MockLanguageModel {
    /// A model that answers with an empty JSON array.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: impl Into<String>) -> Self {
        *self.response.write().unwrap() = Some(response.into());
        self
    }

    /// Make every call fail with `ModelUnavailable`.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        *self.failure.write().unwrap() = Some(message.into());
        self
    }

    pub fn calls(&self) -> Vec<ModelCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn generate(&self, prompt: &str, response_schema: Option<&Value>) -> Result<String> {
        self.calls.write().unwrap().push(ModelCall {
            prompt: prompt.to_string(),
            schema: response_schema.cloned(),
        });

        if let Some(message) = self.failure.read().unwrap().clone() {
            return Err(PipelineError::ModelUnavailable(message.into()));
        }

        Ok(self
            .response
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(|| "[]".to_string()))
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
