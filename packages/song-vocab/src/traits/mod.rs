//! Seams between the pipeline and the outside world.

pub mod fetcher;
pub mod model;
pub mod searcher;
pub mod store;

pub use fetcher::PageFetcher;
pub use model::LanguageModel;
pub use searcher::WebSearcher;
pub use store::VocabularyStore;
