//! In-memory vocabulary store for testing and development.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::error::Result;
use crate::traits::VocabularyStore;
use crate::types::{StoreOutcome, VocabularyItem, VocabularyRecord};

/// Vocabulary rows held in memory, in insertion order.
///
/// Same uniqueness rules as the SQLite store. Data is lost on drop.
#[derive(Default)]
pub struct MemoryVocabularyStore {
    records: RwLock<Vec<VocabularyRecord>>,
}

impl MemoryVocabularyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every stored row.
    pub fn records(&self) -> Vec<VocabularyRecord> {
        self.records.read().unwrap().clone()
    }

    pub fn clear(&self) {
        self.records.write().unwrap().clear();
    }
}

#[async_trait]
impl VocabularyStore for MemoryVocabularyStore {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn store(
        &self,
        song_name: &str,
        artist_name: Option<&str>,
        items: &[VocabularyItem],
    ) -> Result<StoreOutcome> {
        let mut records = self.records.write().unwrap();
        let mut outcome = StoreOutcome::default();

        for item in items {
            if !item.is_valid() {
                outcome.skipped += 1;
                continue;
            }
            let item = VocabularyItem::new(item.word.trim(), item.definition.trim());
            if records
                .iter()
                .any(|r| r.same_key(song_name, artist_name, &item.word))
            {
                outcome.skipped += 1;
                continue;
            }
            records.push(VocabularyRecord::new(song_name, artist_name, &item));
            outcome.inserted += 1;
        }

        Ok(outcome)
    }

    async fn get_for_song(
        &self,
        song_name: &str,
        artist_name: Option<&str>,
    ) -> Result<Vec<VocabularyItem>> {
        Ok(self
            .records
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.song_name == song_name && r.artist_name.as_deref() == artist_name)
            .map(VocabularyRecord::to_item)
            .collect())
    }
}
