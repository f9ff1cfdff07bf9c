//! Web search for lyric pages.

pub mod client;
pub mod google;

pub use client::{build_query, SearchClient};
pub use google::GoogleSearcher;
