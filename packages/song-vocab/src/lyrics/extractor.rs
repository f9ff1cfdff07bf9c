//! Per-URL lyric extraction.

use scraper::Html;
use tracing::{debug, info};

use super::normalize::normalize;
use super::strategy::{default_chain, LyricStrategy};
use crate::error::ExtractionFailed;
use crate::traits::PageFetcher;
use crate::types::{LyricAttempt, LyricDocument, RetrievalConfig, SearchResult};

/// Fetches one candidate page and runs the strategy chain over it.
pub struct LyricExtractor<F> {
    fetcher: F,
    strategies: Vec<Box<dyn LyricStrategy>>,
    min_lyric_chars: usize,
}

impl<F: PageFetcher> LyricExtractor<F> {
    pub fn new(fetcher: F, config: &RetrievalConfig) -> Self {
        Self {
            fetcher,
            strategies: default_chain(config),
            min_lyric_chars: config.min_lyric_chars,
        }
    }

    /// Replace the strategy chain.
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn LyricStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Try a single candidate. Never fails outright: problems are reported
    /// as [`LyricAttempt::Failed`] so the caller can move on.
    pub async fn extract(&self, result: &SearchResult) -> LyricAttempt {
        let html = match self.fetcher.fetch(&result.url).await {
            Ok(html) => html,
            Err(e) => {
                debug!(url = %result.url, error = %e, "Fetch failed");
                return LyricAttempt::Failed {
                    url: result.url.clone(),
                    reason: e.into(),
                };
            }
        };

        match self.extract_from_html(&html, &result.domain) {
            Some((text, strategy)) => {
                info!(
                    url = %result.url,
                    strategy = strategy,
                    chars = text.chars().count(),
                    "Extracted lyrics"
                );
                LyricAttempt::Found(LyricDocument::new(result.url.clone()).with_text(text, strategy))
            }
            None => {
                debug!(url = %result.url, "No strategy produced lyrics");
                LyricAttempt::Failed {
                    url: result.url.clone(),
                    reason: ExtractionFailed::NoQualifyingText,
                }
            }
        }
    }

    /// Run the chain over raw HTML, returning normalized text and the name
    /// of the strategy that produced it.
    pub fn extract_from_html(&self, html: &str, domain: &str) -> Option<(String, &'static str)> {
        let document = Html::parse_document(html);

        for strategy in &self.strategies {
            if !strategy.applies_to(domain) {
                continue;
            }
            let Some(raw) = strategy.extract(&document) else {
                continue;
            };

            let text = normalize(&raw);
            let chars = text.chars().count();
            if chars > self.min_lyric_chars {
                return Some((text, strategy.name()));
            }
            debug!(
                strategy = strategy.name(),
                chars = chars,
                "Candidate text too short"
            );
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::testing::MockFetcher;

    const LYRICS: &str = "Yesterday, all my troubles seemed so far away<br>\
        Now it looks as though they're here to stay<br>\
        Oh, I believe in yesterday";

    fn extractor(fetcher: MockFetcher) -> LyricExtractor<MockFetcher> {
        LyricExtractor::new(fetcher, &RetrievalConfig::default())
    }

    #[tokio::test]
    async fn test_generic_selector_success() {
        let url = "https://www.lyrics.com/lyric/1/yesterday";
        let fetcher = MockFetcher::new().with_page(
            url,
            format!("<html><body><div class='lyrics'>{}</div></body></html>", LYRICS),
        );
        let result = SearchResult::from_url(url).unwrap();

        let attempt = extractor(fetcher).extract(&result).await;

        let LyricAttempt::Found(doc) = attempt else {
            panic!("expected lyrics");
        };
        assert_eq!(doc.strategy, Some("common-selector"));
        assert!(doc.text().unwrap().starts_with("Yesterday, all my troubles"));
        assert_eq!(doc.source_url.as_str(), url);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_recoverable() {
        let url = "https://www.azlyrics.com/lyrics/beatles/yesterday.html";
        let fetcher = MockFetcher::new().with_failure(url, 403);
        let result = SearchResult::from_url(url).unwrap();

        let attempt = extractor(fetcher).extract(&result).await;

        assert!(matches!(
            attempt,
            LyricAttempt::Failed {
                reason: ExtractionFailed::Fetch(FetchError::Status { status: 403, .. }),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_short_text_rejected() {
        let url = "https://songlyrics.com/x";
        let fetcher =
            MockFetcher::new().with_page(url, "<div class='lyrics'>Too short to count</div>");
        let result = SearchResult::from_url(url).unwrap();

        let attempt = extractor(fetcher).extract(&result).await;

        assert!(matches!(
            attempt,
            LyricAttempt::Failed {
                reason: ExtractionFailed::NoQualifyingText,
                ..
            }
        ));
    }

    #[test]
    fn test_chain_falls_through_to_pre() {
        let extractor = extractor(MockFetcher::new());
        let verse = "And in the end, the love you take is equal to the love you make\n".repeat(3);
        let html = format!(
            "<div class='lyrics'>short</div><pre>{}</pre>",
            verse
        );

        let (text, strategy) = extractor.extract_from_html(&html, "lyricfind.com").unwrap();
        assert_eq!(strategy, "longest-pre");
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_site_marker_only_on_its_domain() {
        let extractor = extractor(MockFetcher::new());
        let html = format!(
            "<div><!-- Usage of azlyrics.com content is prohibited -->{}</div>",
            LYRICS
        );

        let (_, strategy) = extractor.extract_from_html(&html, "azlyrics.com").unwrap();
        assert_eq!(strategy, "site-marker");
        assert!(extractor.extract_from_html(&html, "lyrics.com").is_none());
    }

    #[test]
    fn test_output_is_normalized() {
        let extractor = extractor(MockFetcher::new());
        let html = format!(
            "<div id='lyrics'>{}<br><br><br><br>{}</div>",
            LYRICS, LYRICS
        );

        let (text, _) = extractor.extract_from_html(&html, "lyrics.com").unwrap();
        assert!(text.contains("yesterday\n\nYesterday"));
        assert!(!text.contains("\n\n\n"));
    }
}
