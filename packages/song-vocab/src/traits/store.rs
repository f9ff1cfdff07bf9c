//! Vocabulary persistence.
//!
//! Rows are keyed by (song, artist, word). A missing artist is its own key:
//! `(song, None, word)` never collides with `(song, Some(a), word)`.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{StoreOutcome, VocabularyItem};

/// Durable store for vocabulary rows.
#[async_trait]
pub trait VocabularyStore: Send + Sync {
    /// Create the table and indexes if missing. Safe to call repeatedly.
    async fn initialize(&self) -> Result<()>;

    /// Insert a batch, silently skipping rows whose key already exists.
    ///
    /// Within one batch the first occurrence of a key wins. Items with a
    /// blank word or definition are skipped. Failures other than key
    /// conflicts are `StorageFault`.
    async fn store(
        &self,
        song_name: &str,
        artist_name: Option<&str>,
        items: &[VocabularyItem],
    ) -> Result<StoreOutcome>;

    /// All items stored for a song, in insertion order.
    ///
    /// `None` matches only rows stored without an artist.
    async fn get_for_song(
        &self,
        song_name: &str,
        artist_name: Option<&str>,
    ) -> Result<Vec<VocabularyItem>>;

    /// Release resources.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
