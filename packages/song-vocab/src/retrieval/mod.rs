//! Lyric retrieval across search candidates.

pub mod buckets;
pub mod coordinator;

pub use buckets::partition;
pub use coordinator::{Retrieval, RetrievalCoordinator};
