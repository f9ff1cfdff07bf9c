//! Lyric extraction from fetched pages.

pub mod extractor;
pub mod normalize;
pub mod render;
pub mod strategy;

pub use extractor::LyricExtractor;
pub use normalize::normalize;
pub use render::TextRenderer;
pub use strategy::{
    default_chain, LongestBlockStrategy, LyricStrategy, MarkerStrategy, SelectorStrategy,
};
