//! Per-URL lyric extraction results.

use url::Url;

use crate::error::ExtractionFailed;

/// Lyrics pulled from one page.
///
/// `extracted_text` stays `None` until a strategy succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricDocument {
    pub source_url: Url,
    pub extracted_text: Option<String>,

    /// Name of the strategy that produced the text.
    pub strategy: Option<&'static str>,
}

impl LyricDocument {
    pub fn new(source_url: Url) -> Self {
        Self {
            source_url,
            extracted_text: None,
            strategy: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>, strategy: &'static str) -> Self {
        self.extracted_text = Some(text.into());
        self.strategy = Some(strategy);
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.extracted_text.as_deref()
    }

    pub fn has_text(&self) -> bool {
        self.text().map_or(false, |t| !t.is_empty())
    }
}

/// Outcome of trying a single candidate URL.
#[derive(Debug)]
pub enum LyricAttempt {
    Found(LyricDocument),
    Failed { url: Url, reason: ExtractionFailed },
}

impl LyricAttempt {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn url(&self) -> &Url {
        match self {
            Self::Found(doc) => &doc.source_url,
            Self::Failed { url, .. } => url,
        }
    }
}
