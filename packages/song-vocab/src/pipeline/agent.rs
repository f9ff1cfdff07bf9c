//! The song-to-vocabulary agent.
//!
//! Runs retrieval, vocabulary extraction and storage in order, stopping at
//! the first stage that fails. Nothing is retried and rows already written
//! are never rolled back.

use tracing::{info, warn};
use url::Url;

use super::state::{PipelineStage, PipelineState};
use crate::error::{PipelineError, Result};
use crate::retrieval::{Retrieval, RetrievalCoordinator};
use crate::search::build_query;
use crate::traits::{LanguageModel, PageFetcher, VocabularyStore, WebSearcher};
use crate::types::{RetrievalConfig, StoreOutcome, VocabularyItem};
use crate::vocabulary::VocabularyExtractor;

/// Result of one `process_song` run.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub song_name: String,
    pub artist_name: Option<String>,

    /// Final state: `Done` or `Failed(stage)`
    pub state: PipelineState,

    /// Every state entered, starting with `Init`
    pub transitions: Vec<PipelineState>,

    /// What stopped the run, if it failed
    pub error: Option<PipelineError>,

    /// Page the lyrics came from
    pub lyrics_source: Option<Url>,

    /// Vocabulary returned by the model
    pub vocabulary: Vec<VocabularyItem>,

    /// Rows written and skipped
    pub stored: StoreOutcome,
}

impl PipelineOutcome {
    fn new(song_name: &str, artist_name: Option<&str>) -> Self {
        Self {
            song_name: song_name.to_string(),
            artist_name: artist_name.map(str::to_string),
            state: PipelineState::Init,
            transitions: vec![PipelineState::Init],
            error: None,
            lyrics_source: None,
            vocabulary: Vec::new(),
            stored: StoreOutcome::default(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.state == PipelineState::Done
    }

    pub fn failed_stage(&self) -> Option<PipelineStage> {
        match self.state {
            PipelineState::Failed(stage) => Some(stage),
            _ => None,
        }
    }

    fn enter_next(&mut self) {
        self.state = self.state.advance();
        self.transitions.push(self.state);
        info!(song = %self.song_name, state = %self.state, "Pipeline state");
    }

    fn fail(mut self, error: PipelineError) -> Self {
        self.state = self.state.fail();
        self.transitions.push(self.state);
        warn!(
            song = %self.song_name,
            state = %self.state,
            error = %error,
            "Pipeline failed"
        );
        self.error = Some(error);
        self
    }

    fn finish(mut self) -> Self {
        self.enter_next();
        self
    }
}

/// Orchestrates a search engine, page fetcher, language model and store.
pub struct PipelineAgent<S, F, M, V> {
    retrieval: RetrievalCoordinator<S, F>,
    vocabulary: VocabularyExtractor<M>,
    store: V,
}

impl<S, F, M, V> PipelineAgent<S, F, M, V>
where
    S: WebSearcher,
    F: PageFetcher,
    M: LanguageModel,
    V: VocabularyStore,
{
    /// Assemble an agent. The store is initialized here.
    pub async fn new(
        retrieval: RetrievalCoordinator<S, F>,
        vocabulary: VocabularyExtractor<M>,
        store: V,
    ) -> Result<Self> {
        store.initialize().await?;
        Ok(Self {
            retrieval,
            vocabulary,
            store,
        })
    }

    /// Assemble an agent from its raw collaborators.
    pub async fn from_parts(
        searcher: S,
        fetcher: F,
        model: M,
        store: V,
        config: RetrievalConfig,
    ) -> Result<Self> {
        Self::new(
            RetrievalCoordinator::new(searcher, fetcher, config),
            VocabularyExtractor::new(model),
            store,
        )
        .await
    }

    pub fn retrieval(&self) -> &RetrievalCoordinator<S, F> {
        &self.retrieval
    }

    pub fn vocabulary(&self) -> &VocabularyExtractor<M> {
        &self.vocabulary
    }

    pub fn store(&self) -> &V {
        &self.store
    }

    /// Find lyrics, extract vocabulary and store it.
    ///
    /// A blank artist is treated as no artist.
    pub async fn process_song(
        &self,
        song_name: &str,
        artist_name: Option<&str>,
    ) -> PipelineOutcome {
        let song = song_name.trim();
        let artist = artist_name.map(str::trim).filter(|a| !a.is_empty());
        let mut outcome = PipelineOutcome::new(song, artist);

        info!(song = %song, artist = ?artist, "Processing song");

        // Searching
        outcome.enter_next();
        if song.is_empty() {
            return outcome.fail(PipelineError::InvalidInput {
                reason: "song name is empty".into(),
            });
        }
        let results = match self.retrieval.search(song, artist).await {
            Ok(results) => results,
            Err(e) => return outcome.fail(e),
        };
        if results.is_empty() {
            let query = build_query(song, artist, &self.retrieval.config().preferred_domains);
            return outcome.fail(PipelineError::NoResultsFound { query });
        }

        // ExtractingLyrics
        outcome.enter_next();
        let document = match self.retrieval.extract_from(&results).await {
            Retrieval::Found(document) => document,
            Retrieval::NoResults => {
                return outcome.fail(PipelineError::NoLyricsFound { attempted: 0 })
            }
            Retrieval::Exhausted { attempted } => {
                return outcome.fail(PipelineError::NoLyricsFound { attempted })
            }
        };
        outcome.lyrics_source = Some(document.source_url.clone());
        let lyrics = document.extracted_text.unwrap_or_default();

        // ExtractingVocab
        outcome.enter_next();
        let items = match self.vocabulary.extract(&lyrics).await {
            Ok(items) if items.is_empty() => return outcome.fail(PipelineError::EmptyVocabulary),
            Ok(items) => items,
            Err(e) => return outcome.fail(e),
        };
        outcome.vocabulary = items;

        // Storing
        outcome.enter_next();
        let stored = self.store.store(song, artist, &outcome.vocabulary).await;
        match stored {
            Ok(stored) => outcome.stored = stored,
            Err(e) => return outcome.fail(e),
        }

        info!(
            song = %song,
            extracted = outcome.vocabulary.len(),
            inserted = outcome.stored.inserted,
            "Song processed"
        );
        outcome.finish()
    }

    /// [`process_song`](Self::process_song), reduced to success or failure.
    pub async fn process_song_ok(&self, song_name: &str, artist_name: Option<&str>) -> bool {
        self.process_song(song_name, artist_name).await.is_success()
    }

    /// Stored vocabulary for a song. A blank artist is treated as no artist.
    pub async fn get_vocabulary_for_song(
        &self,
        song_name: &str,
        artist_name: Option<&str>,
    ) -> Result<Vec<VocabularyItem>> {
        let artist = artist_name.map(str::trim).filter(|a| !a.is_empty());
        self.store.get_for_song(song_name.trim(), artist).await
    }

    /// Close the store.
    pub async fn close(&self) -> Result<()> {
        self.store.close().await
    }
}
