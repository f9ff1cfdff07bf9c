//! Song Vocabulary Pipeline
//!
//! Finds the lyrics of a song on the web, asks a language model for the
//! words a learner may not know, and stores them in SQLite.
//!
//! # Usage
//!
//! ```rust,ignore
//! use song_vocab::{PipelineAgent, RetrievalConfig, SqliteVocabularyStore};
//! use song_vocab::testing::{MockFetcher, MockLanguageModel, MockWebSearcher};
//!
//! let agent = PipelineAgent::from_parts(
//!     MockWebSearcher::new(),
//!     MockFetcher::new(),
//!     MockLanguageModel::new(),
//!     SqliteVocabularyStore::in_memory().await?,
//!     RetrievalConfig::default(),
//! )
//! .await?;
//!
//! let outcome = agent.process_song("Bohemian Rhapsody", Some("Queen")).await;
//! if let Some(stage) = outcome.failed_stage() {
//!     eprintln!("failed while {}", stage);
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Seams: WebSearcher, PageFetcher, LanguageModel, VocabularyStore
//! - [`search`] - Google Custom Search and query building
//! - [`lyrics`] - Per-page lyric extraction strategies
//! - [`retrieval`] - Domain bucketing and the candidate loop
//! - [`vocabulary`] - Schema-constrained LLM extraction
//! - [`stores`] - SQLite and in-memory stores
//! - [`pipeline`] - The fail-fast agent
//! - [`testing`] - Mock implementations for testing

pub mod config;
pub mod error;
pub mod fetchers;
pub mod lyrics;
pub mod pipeline;
pub mod retrieval;
pub mod search;
pub mod security;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;
pub mod vocabulary;

// Re-export core types at crate root
pub use config::Config;
pub use error::{ExtractionFailed, FetchError, PipelineError, Result};
pub use fetchers::HttpFetcher;
pub use lyrics::LyricExtractor;
pub use pipeline::{PipelineAgent, PipelineOutcome, PipelineStage, PipelineState};
pub use retrieval::{Retrieval, RetrievalCoordinator};
pub use search::{GoogleSearcher, SearchClient};
pub use security::SecretString;
pub use stores::{MemoryVocabularyStore, SqliteVocabularyStore};
pub use traits::{LanguageModel, PageFetcher, VocabularyStore, WebSearcher};
pub use types::{
    DomainBucket, LyricAttempt, LyricDocument, RetrievalConfig, SearchHit, SearchResult,
    StoreOutcome, VocabularyItem, VocabularyRecord,
};
pub use vocabulary::{GeminiModel, VocabularyExtractor};
