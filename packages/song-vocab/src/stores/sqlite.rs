//! SQLite vocabulary store.
//!
//! One connection, one writer. Uniqueness is enforced by the database:
//! `UNIQUE(song_name, artist_name, word)` covers rows with an artist, and a
//! partial index covers rows without one (SQLite treats NULLs as distinct in
//! ordinary unique constraints).

use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::traits::VocabularyStore;
use crate::types::{StoreOutcome, VocabularyItem};

/// Default database location, created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://vocabulary.db?mode=rwc";

/// SQLite-backed vocabulary store.
pub struct SqliteVocabularyStore {
    pool: SqlitePool,
}

#[derive(Debug, FromRow)]
struct VocabularyRow {
    word: String,
    definition: String,
}

impl SqliteVocabularyStore {
    /// Open a connection pool without touching the schema.
    ///
    /// # Example URLs
    /// - `sqlite::memory:` - In-memory database (ephemeral)
    /// - `sqlite://vocabulary.db?mode=rwc` - File, created if missing
    pub async fn connect(database_url: &str) -> Result<Self> {
        // A single long-lived connection keeps in-memory databases alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(Option::<Duration>::None)
            .max_lifetime(Option::<Duration>::None)
            .connect(database_url)
            .await
            .map_err(PipelineError::storage)?;

        debug!(url = %database_url, "Connected to vocabulary database");
        Ok(Self { pool })
    }

    /// Connect and create the schema.
    pub async fn open(database_url: &str) -> Result<Self> {
        let store = Self::connect(database_url).await?;
        store.initialize().await?;
        Ok(store)
    }

    /// Create an initialized in-memory store (for testing).
    pub async fn in_memory() -> Result<Self> {
        Self::open("sqlite::memory:").await
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Total number of stored rows.
    pub async fn count(&self) -> Result<usize> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vocabulary")
            .fetch_one(&self.pool)
            .await
            .map_err(PipelineError::storage)?;
        Ok(count as usize)
    }
}

#[async_trait]
impl VocabularyStore for SqliteVocabularyStore {
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS vocabulary (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                song_name TEXT NOT NULL,
                artist_name TEXT,
                word TEXT NOT NULL,
                definition TEXT NOT NULL,
                UNIQUE(song_name, artist_name, word)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(PipelineError::storage)?;

        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_vocabulary_song_word_no_artist
            ON vocabulary(song_name, word)
            WHERE artist_name IS NULL
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(PipelineError::storage)?;

        info!("Vocabulary table ready");
        Ok(())
    }

    async fn store(
        &self,
        song_name: &str,
        artist_name: Option<&str>,
        items: &[VocabularyItem],
    ) -> Result<StoreOutcome> {
        let mut outcome = StoreOutcome::default();
        if items.is_empty() {
            return Ok(outcome);
        }

        let mut tx = self.pool.begin().await.map_err(PipelineError::storage)?;

        for item in items {
            if !item.is_valid() {
                outcome.skipped += 1;
                continue;
            }

            let result = sqlx::query(
                r#"
                INSERT INTO vocabulary (song_name, artist_name, word, definition)
                VALUES (?, ?, ?, ?)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(song_name)
            .bind(artist_name)
            .bind(item.word.trim())
            .bind(item.definition.trim())
            .execute(&mut *tx)
            .await;

            match result {
                Ok(done) if done.rows_affected() > 0 => outcome.inserted += 1,
                Ok(_) => {
                    debug!(word = %item.word, "Word already stored");
                    outcome.skipped += 1;
                }
                Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                    debug!(word = %item.word, "Word already stored");
                    outcome.skipped += 1;
                }
                Err(e) => return Err(PipelineError::storage(e)),
            }
        }

        tx.commit().await.map_err(PipelineError::storage)?;

        info!(
            song = %song_name,
            inserted = outcome.inserted,
            skipped = outcome.skipped,
            "Stored vocabulary"
        );
        Ok(outcome)
    }

    async fn get_for_song(
        &self,
        song_name: &str,
        artist_name: Option<&str>,
    ) -> Result<Vec<VocabularyItem>> {
        let rows: Vec<VocabularyRow> = match artist_name {
            Some(artist) => {
                sqlx::query_as(
                    r#"
                    SELECT word, definition FROM vocabulary
                    WHERE song_name = ? AND artist_name = ?
                    ORDER BY id
                    "#,
                )
                .bind(song_name)
                .bind(artist)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(
                    r#"
                    SELECT word, definition FROM vocabulary
                    WHERE song_name = ? AND artist_name IS NULL
                    ORDER BY id
                    "#,
                )
                .bind(song_name)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(PipelineError::storage)?;

        Ok(rows
            .into_iter()
            .map(|row| VocabularyItem::new(row.word, row.definition))
            .collect())
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}
