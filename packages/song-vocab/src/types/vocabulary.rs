//! Vocabulary items and persisted records.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A word a learner may not know, with a short definition.
///
/// Doubles as the structured-output schema sent to the language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VocabularyItem {
    /// The word or short phrase, as it appears in the lyrics
    pub word: String,

    /// A concise, learner-friendly definition
    pub definition: String,
}

impl VocabularyItem {
    pub fn new(word: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            definition: definition.into(),
        }
    }

    /// Both fields carry non-whitespace text.
    pub fn is_valid(&self) -> bool {
        !self.word.trim().is_empty() && !self.definition.trim().is_empty()
    }
}

/// A stored vocabulary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyRecord {
    pub song_name: String,
    pub artist_name: Option<String>,
    pub word: String,
    pub definition: String,
}

impl VocabularyRecord {
    pub fn new(song_name: &str, artist_name: Option<&str>, item: &VocabularyItem) -> Self {
        Self {
            song_name: song_name.to_string(),
            artist_name: artist_name.map(str::to_string),
            word: item.word.clone(),
            definition: item.definition.clone(),
        }
    }

    /// Same (song, artist, word) key. A `None` artist only matches `None`.
    pub fn same_key(&self, song_name: &str, artist_name: Option<&str>, word: &str) -> bool {
        self.song_name == song_name && self.artist_name.as_deref() == artist_name && self.word == word
    }

    pub fn to_item(&self) -> VocabularyItem {
        VocabularyItem::new(&self.word, &self.definition)
    }
}

/// Result of a `store` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOutcome {
    /// Rows actually written
    pub inserted: usize,

    /// Rows dropped as duplicates or invalid
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_validity() {
        assert!(VocabularyItem::new("landslide", "a sudden collapse").is_valid());
        assert!(!VocabularyItem::new("", "x").is_valid());
        assert!(!VocabularyItem::new("x", "   ").is_valid());
    }

    #[test]
    fn test_record_key_matches_null_artist_exactly() {
        let item = VocabularyItem::new("a", "d");
        let record = VocabularyRecord::new("Song", None, &item);

        assert!(record.same_key("Song", None, "a"));
        assert!(!record.same_key("Song", Some("Artist"), "a"));
        assert!(!record.same_key("Song", None, "b"));
    }
}
