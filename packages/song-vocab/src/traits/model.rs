//! Language model abstraction.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// A text-generation model that can be constrained to a JSON schema.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a completion for `prompt`.
    ///
    /// When `response_schema` is set the model must answer with JSON matching
    /// it. Transport failures map to `ModelUnavailable`.
    async fn generate(&self, prompt: &str, response_schema: Option<&Value>) -> Result<String>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str {
        "unknown"
    }
}
