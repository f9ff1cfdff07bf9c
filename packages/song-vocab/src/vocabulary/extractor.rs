//! Structured vocabulary extraction from lyrics.

use gemini_client::StructuredOutput;
use serde_json::Value;
use tracing::{debug, info};

use super::prompts::format_vocabulary_prompt;
use crate::error::{PipelineError, Result};
use crate::traits::LanguageModel;
use crate::types::VocabularyItem;

/// Asks a language model for vocabulary and validates the answer.
pub struct VocabularyExtractor<M> {
    model: M,
    schema: Value,
}

impl<M: LanguageModel> VocabularyExtractor<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            schema: Vec::<VocabularyItem>::gemini_schema(),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Response schema sent with every request.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Extract vocabulary from `lyrics`. One model call, no retries.
    ///
    /// An empty list is a valid answer here; callers decide what it means.
    pub async fn extract(&self, lyrics: &str) -> Result<Vec<VocabularyItem>> {
        if lyrics.trim().is_empty() {
            return Err(PipelineError::InvalidInput {
                reason: "lyrics are empty".into(),
            });
        }

        let prompt = format_vocabulary_prompt(lyrics);
        debug!(
            model = self.model.model_name(),
            prompt_chars = prompt.len(),
            "Requesting vocabulary"
        );

        let raw = self.model.generate(&prompt, Some(&self.schema)).await?;
        let items = parse_vocabulary_response(&raw)?;

        info!(count = items.len(), "Vocabulary extracted");
        Ok(items)
    }
}

/// Decode and validate the model's JSON payload.
///
/// Every element must carry a non-blank `word` and `definition`; both are
/// trimmed. Anything else is `MalformedModelOutput`.
pub fn parse_vocabulary_response(raw: &str) -> Result<Vec<VocabularyItem>> {
    let items: Vec<VocabularyItem> = serde_json::from_str(raw.trim())
        .map_err(|e| PipelineError::malformed(format!("expected array of word/definition: {}", e)))?;

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let item = VocabularyItem::new(item.word.trim(), item.definition.trim());
            if item.is_valid() {
                Ok(item)
            } else {
                Err(PipelineError::malformed(format!(
                    "item {} has an empty word or definition",
                    index
                )))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockLanguageModel;

    #[tokio::test]
    async fn test_extracts_and_sends_schema() {
        let model = MockLanguageModel::new().with_response(
            r#"[{"word": " landslide ", "definition": "a collapse of earth"},
                {"word": "fandango", "definition": "a lively Spanish dance"}]"#,
        );
        let extractor = VocabularyExtractor::new(model);

        let items = extractor.extract("Caught in a landslide").await.unwrap();

        assert_eq!(
            items,
            vec![
                VocabularyItem::new("landslide", "a collapse of earth"),
                VocabularyItem::new("fandango", "a lively Spanish dance"),
            ]
        );

        let calls = extractor.model().calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.contains("---\nCaught in a landslide\n---"));
        let schema = calls[0].schema.as_ref().unwrap();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(schema["items"]["type"], "OBJECT");
        assert_eq!(
            schema["items"]["propertyOrdering"],
            serde_json::json!(["word", "definition"])
        );
    }

    #[tokio::test]
    async fn test_blank_lyrics_never_reach_model() {
        let extractor = VocabularyExtractor::new(MockLanguageModel::new().with_response("[]"));

        let err = extractor.extract("  \n ").await.unwrap_err();

        assert!(matches!(err, PipelineError::InvalidInput { .. }));
        assert!(extractor.model().calls().is_empty());
    }

    #[tokio::test]
    async fn test_model_failure_surfaces() {
        let extractor = VocabularyExtractor::new(MockLanguageModel::new().with_failure("503"));

        let err = extractor.extract("some lyrics").await.unwrap_err();

        assert!(matches!(err, PipelineError::ModelUnavailable(_)));
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(parse_vocabulary_response("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_payloads() {
        for raw in [
            "not json",
            r#"{"word": "a", "definition": "b"}"#,
            r#"[{"word": "a"}]"#,
            r#"[{"word": 1, "definition": "b"}]"#,
            r#"[{"word": "  ", "definition": "b"}]"#,
        ] {
            let err = parse_vocabulary_response(raw).unwrap_err();
            assert!(
                matches!(err, PipelineError::MalformedModelOutput { .. }),
                "{} should be malformed",
                raw
            );
        }
    }
}
