//! Gemini API request and response types.

use serde::{Deserialize, Serialize};

use crate::error::{GeminiError, Result};

// =============================================================================
// generateContent request
// =============================================================================

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns
    pub contents: Vec<Content>,

    /// Sampling and output-shape settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single user turn containing `prompt`.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            generation_config: None,
        }
    }

    /// Constrain the response to JSON matching `schema`.
    ///
    /// The schema must already be in Gemini's dialect; see
    /// [`crate::StructuredOutput::gemini_schema`].
    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        let config = self.generation_config.get_or_insert_with(GenerationConfig::default);
        config.response_mime_type = Some("application/json".to_string());
        config.response_schema = Some(schema);
        self
    }
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Role: "user" or "model"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Content parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a user turn with a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }
}

/// A content part. Only text parts are modelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Generation settings.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// e.g. "application/json"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,

    /// OpenAPI-subset schema the model must follow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

// =============================================================================
// generateContent response
// =============================================================================

/// Response body from `generateContent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    /// Present when the prompt itself was rejected
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,

    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if present and non-empty.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
    }

    /// Take the first text part, or say why there is none.
    pub fn into_text(self) -> Result<String> {
        if let Some(text) = self.first_text() {
            return Ok(text.to_string());
        }

        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(GeminiError::Blocked { reason });
        }

        Err(GeminiError::NoContent {
            finish_reason: self
                .candidates
                .into_iter()
                .next()
                .and_then(|c| c.finish_reason),
        })
    }
}

/// Feedback on the prompt.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// e.g. "SAFETY", "BLOCKLIST", "OTHER"
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// A single generated candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,

    /// e.g. "STOP", "MAX_TOKENS", "SAFETY"
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: Option<u32>,
    #[serde(default)]
    pub candidates_token_count: Option<u32>,
    #[serde(default)]
    pub total_token_count: Option<u32>,
}

/// Body of a non-2xx response: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,

    /// e.g. "INVALID_ARGUMENT", "RESOURCE_EXHAUSTED"
    #[serde(default)]
    pub status: Option<String>,
}

impl ApiErrorBody {
    /// Gemini's error message, or the raw body when it is not the usual shape.
    pub fn message_from(body: &str) -> String {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) if !parsed.error.message.is_empty() => match parsed.error.status {
                Some(status) => format!("{} ({})", parsed.error.message, status),
                None => parsed.error.message,
            },
            _ => body.trim().to_string(),
        }
    }
}
