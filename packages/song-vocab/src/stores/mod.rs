//! Vocabulary store implementations.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryVocabularyStore;
pub use sqlite::{SqliteVocabularyStore, DEFAULT_DATABASE_URL};
