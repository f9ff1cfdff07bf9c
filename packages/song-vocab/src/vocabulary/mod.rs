//! Vocabulary extraction with a language model.

pub mod extractor;
pub mod gemini;
pub mod prompts;

pub use extractor::{parse_vocabulary_response, VocabularyExtractor};
pub use gemini::{GeminiModel, DEFAULT_MODEL};
pub use prompts::{format_vocabulary_prompt, VOCABULARY_PROMPT};
