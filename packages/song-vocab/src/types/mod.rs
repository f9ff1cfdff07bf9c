//! Core data types.

pub mod config;
pub mod lyrics;
pub mod search;
pub mod vocabulary;

pub use config::{RetrievalConfig, EXCLUDED_DOMAIN, MAX_SEARCH_RESULTS, PREFERRED_DOMAINS};
pub use lyrics::{LyricAttempt, LyricDocument};
pub use search::{domain_of, DomainBucket, SearchHit, SearchResult};
pub use vocabulary::{StoreOutcome, VocabularyItem, VocabularyRecord};
