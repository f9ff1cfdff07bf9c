//! Gemini-backed [`LanguageModel`].

use async_trait::async_trait;
use gemini_client::{GeminiClient, GeminiError};
use serde_json::Value;

use crate::error::{PipelineError, Result};
use crate::traits::LanguageModel;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// A Gemini model behind the pipeline's model seam.
pub struct GeminiModel {
    client: GeminiClient,
    model: String,
}

impl GeminiModel {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Create with the default model.
    pub fn with_default_model(client: GeminiClient) -> Self {
        Self::new(client, DEFAULT_MODEL)
    }

    pub fn client(&self) -> &GeminiClient {
        &self.client
    }
}

#[async_trait]
impl LanguageModel for GeminiModel {
    async fn generate(&self, prompt: &str, response_schema: Option<&Value>) -> Result<String> {
        let result = match response_schema {
            Some(schema) => {
                self.client
                    .structured_output(&self.model, prompt, schema.clone())
                    .await
            }
            None => self.client.generate_text(&self.model, prompt).await,
        };
        result.map_err(into_pipeline_error)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn into_pipeline_error(e: GeminiError) -> PipelineError {
    match e {
        GeminiError::Parse(reason) => PipelineError::malformed(reason),
        other => PipelineError::ModelUnavailable(Box::new(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            into_pipeline_error(GeminiError::Parse("bad json".into())),
            PipelineError::MalformedModelOutput { .. }
        ));
        assert!(matches!(
            into_pipeline_error(GeminiError::Network("refused".into())),
            PipelineError::ModelUnavailable(_)
        ));
        assert!(matches!(
            into_pipeline_error(GeminiError::Api {
                status: 503,
                message: "The model is overloaded.".into(),
            }),
            PipelineError::ModelUnavailable(_)
        ));
        assert!(matches!(
            into_pipeline_error(GeminiError::Blocked {
                reason: "SAFETY".into(),
            }),
            PipelineError::ModelUnavailable(_)
        ));
        assert!(matches!(
            into_pipeline_error(GeminiError::Timeout(std::time::Duration::from_secs(30))),
            PipelineError::ModelUnavailable(_)
        ));
    }

    #[test]
    fn test_model_name() {
        let model = GeminiModel::with_default_model(GeminiClient::new("key").unwrap());
        assert_eq!(model.model_name(), "gemini-2.0-flash");
        assert_eq!(model.client().api_key(), "key");
    }
}
