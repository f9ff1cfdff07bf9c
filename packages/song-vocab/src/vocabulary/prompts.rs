//! LLM prompts for vocabulary extraction.

/// Prompt asking for learner-unfamiliar words in a set of lyrics.
pub const VOCABULARY_PROMPT: &str = r#"From the following song lyrics, identify a list of vocabulary words that might be
unfamiliar to a language learner. For each identified word, provide a concise definition.
Focus on contextually relevant terms.

Return the output as a JSON array of objects, where each object has two keys:
"word" and "definition".

Example format:
[
    {
        "word": "melancholy",
        "definition": "a feeling of pensive sadness, typically with no obvious cause."
    },
    {
        "word": "serenade",
        "definition": "a piece of music sung or played in the open air, typically by a man to his beloved one."
    }
]

Lyrics:
---
{lyrics}
---"#;

/// Format the vocabulary prompt with lyrics.
pub fn format_vocabulary_prompt(lyrics: &str) -> String {
    VOCABULARY_PROMPT.replace("{lyrics}", lyrics.trim())
}
