//! Pure Gemini REST API client
//!
//! A minimal client for Google's Gemini `generateContent` endpoint with no
//! domain-specific logic. Supports plain text generation and schema-constrained
//! structured output.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let client = GeminiClient::new(api_key)?;
//!
//! let text = client
//!     .generate_text("gemini-2.0-flash", "Say hello")
//!     .await?;
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{GeminiError, Result};
pub use schema::StructuredOutput;
pub use types::*;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upper bound on a whole request, including reading the body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a client with the given API key and [`DEFAULT_TIMEOUT`].
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeminiError::Config(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        })
    }

    /// Set a custom base URL (for proxies, Vertex gateways, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Raw `generateContent` call.
    ///
    /// The key travels in the `x-goog-api-key` header so it never ends up in
    /// a URL that reqwest would echo back inside an error.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/models/{}:generateContent", self.base_url, model))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = ApiErrorBody::message_from(&error_text);
            warn!(status = %status, error = %message, "Gemini API error");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.request_error(e)
            } else {
                GeminiError::Parse(e.without_url().to_string())
            }
        })?;

        debug!(
            model = %model,
            duration_ms = start.elapsed().as_millis(),
            candidates = body.candidates.len(),
            "Gemini generateContent"
        );

        Ok(body)
    }

    /// Single-shot text generation.
    pub async fn generate_text(&self, model: &str, prompt: impl Into<String>) -> Result<String> {
        let request = GenerateContentRequest::from_prompt(prompt);
        self.first_text(model, &request).await
    }

    /// Structured output with an explicit response schema.
    ///
    /// Returns the raw JSON text the model produced; the caller parses it.
    pub async fn structured_output(
        &self,
        model: &str,
        prompt: impl Into<String>,
        schema: serde_json::Value,
    ) -> Result<String> {
        let request = GenerateContentRequest::from_prompt(prompt).with_response_schema(schema);
        self.first_text(model, &request).await
    }

    async fn first_text(&self, model: &str, request: &GenerateContentRequest) -> Result<String> {
        let response = self.generate_content(model, request).await?;
        response.into_text().map_err(|e| {
            warn!(model = %model, error = %e, "Gemini response had no text");
            e
        })
    }

    fn request_error(&self, e: reqwest::Error) -> GeminiError {
        warn!(error = %e, "Gemini request failed");
        if e.is_timeout() {
            GeminiError::Timeout(self.timeout)
        } else {
            GeminiError::Network(e.without_url().to_string())
        }
    }
}
