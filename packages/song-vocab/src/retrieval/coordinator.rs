//! Drives lyric retrieval: search, bucket by domain, try each URL in turn.
//!
//! Attempts are strictly sequential. The first URL whose page yields lyrics
//! ends the search; every failure before that is logged and skipped.

use tracing::{debug, info, warn};

use super::buckets::partition;
use crate::error::Result;
use crate::lyrics::LyricExtractor;
use crate::search::SearchClient;
use crate::traits::{PageFetcher, WebSearcher};
use crate::types::{DomainBucket, LyricAttempt, LyricDocument, RetrievalConfig, SearchResult};

/// How a retrieval ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retrieval {
    /// Lyrics extracted from some candidate
    Found(LyricDocument),

    /// Search returned nothing usable; nothing was fetched
    NoResults,

    /// Every candidate was tried and none produced lyrics
    Exhausted { attempted: usize },
}

impl Retrieval {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The lyric text, if any.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Found(doc) => doc.extracted_text,
            _ => None,
        }
    }
}

/// Search-and-extract loop over a searcher and a fetcher.
pub struct RetrievalCoordinator<S, F> {
    search: SearchClient<S>,
    extractor: LyricExtractor<F>,
    config: RetrievalConfig,
}

impl<S: WebSearcher, F: PageFetcher> RetrievalCoordinator<S, F> {
    pub fn new(searcher: S, fetcher: F, config: RetrievalConfig) -> Self {
        Self {
            search: SearchClient::new(searcher, config.clone()),
            extractor: LyricExtractor::new(fetcher, &config),
            config,
        }
    }

    /// Replace the extractor (custom strategy chains).
    pub fn with_extractor(mut self, extractor: LyricExtractor<F>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn searcher(&self) -> &S {
        self.search.searcher()
    }

    pub fn fetcher(&self) -> &F {
        self.extractor.fetcher()
    }

    /// Run the search only.
    pub async fn search(
        &self,
        song_name: &str,
        artist_name: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        self.search.query(song_name, artist_name).await
    }

    /// Order candidates into domain buckets.
    pub fn plan(&self, results: &[SearchResult]) -> Vec<DomainBucket> {
        partition(results, &self.config)
    }

    /// Try candidates bucket by bucket until one yields lyrics.
    pub async fn extract_from(&self, results: &[SearchResult]) -> Retrieval {
        let buckets = self.plan(results);
        if buckets.is_empty() {
            info!("No usable candidates to fetch");
            return Retrieval::NoResults;
        }

        let mut attempted = 0;
        for bucket in &buckets {
            debug!(domain = %bucket.domain, candidates = bucket.len(), "Trying domain");

            for result in &bucket.results {
                attempted += 1;
                match self.extractor.extract(result).await {
                    LyricAttempt::Found(doc) => {
                        info!(url = %doc.source_url, attempted = attempted, "Lyrics retrieved");
                        return Retrieval::Found(doc);
                    }
                    LyricAttempt::Failed { url, reason } => {
                        warn!(url = %url, reason = %reason, "Candidate failed");
                    }
                }
            }
        }

        warn!(attempted = attempted, "Exhausted all candidates");
        Retrieval::Exhausted { attempted }
    }

    /// Search, then extract. Only search failures are errors.
    pub async fn retrieve(&self, song_name: &str, artist_name: Option<&str>) -> Result<Retrieval> {
        let results = self.search(song_name, artist_name).await?;
        if results.is_empty() {
            return Ok(Retrieval::NoResults);
        }
        Ok(self.extract_from(&results).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::testing::{MockFetcher, MockWebSearcher};
    use crate::types::SearchHit;

    const PAGE: &str = "<div class='lyrics'>Here comes the sun, doo-doo-doo-doo<br>\
        Here comes the sun, and I say it's all right</div>";

    fn coordinator(
        hits: &[&str],
        fetcher: MockFetcher,
    ) -> RetrievalCoordinator<MockWebSearcher, MockFetcher> {
        let searcher =
            MockWebSearcher::new().with_hits(hits.iter().map(|u| SearchHit::new(*u)).collect());
        RetrievalCoordinator::new(searcher, fetcher, RetrievalConfig::default())
    }

    #[tokio::test]
    async fn test_first_success_stops_search() {
        let fetcher = MockFetcher::new()
            .with_page("https://www.songlyrics.com/a", PAGE)
            .with_page("https://www.songlyrics.com/b", PAGE);
        let coordinator = coordinator(
            &["https://www.songlyrics.com/a", "https://www.songlyrics.com/b"],
            fetcher,
        );

        let retrieval = coordinator.retrieve("Here Comes the Sun", None).await.unwrap();

        assert!(retrieval.is_found());
        assert_eq!(coordinator.fetcher().fetched(), vec!["https://www.songlyrics.com/a"]);
    }

    #[tokio::test]
    async fn test_preferred_domain_tried_before_rank() {
        let fetcher = MockFetcher::new()
            .with_page("https://unknown.net/x", PAGE)
            .with_failure("https://www.azlyrics.com/y", 404);
        let coordinator = coordinator(
            &["https://unknown.net/x", "https://www.azlyrics.com/y"],
            fetcher,
        );

        let retrieval = coordinator.retrieve("Song", None).await.unwrap();

        assert!(retrieval.is_found());
        assert_eq!(
            coordinator.fetcher().fetched(),
            vec!["https://www.azlyrics.com/y", "https://unknown.net/x"]
        );
    }

    #[tokio::test]
    async fn test_no_results_fetches_nothing() {
        let coordinator = coordinator(&[], MockFetcher::new());

        let retrieval = coordinator.retrieve("Song", None).await.unwrap();

        assert_eq!(retrieval, Retrieval::NoResults);
        assert!(coordinator.fetcher().fetched().is_empty());
    }

    #[tokio::test]
    async fn test_only_excluded_results_is_no_results() {
        let coordinator = coordinator(&["https://genius.com/song"], MockFetcher::new());

        let retrieval = coordinator.retrieve("Song", None).await.unwrap();

        assert_eq!(retrieval, Retrieval::NoResults);
        assert!(coordinator.fetcher().fetched().is_empty());
    }

    #[tokio::test]
    async fn test_exhausted_counts_attempts() {
        let coordinator = coordinator(
            &["https://www.lyrics.com/1", "https://www.lyrics.com/2"],
            MockFetcher::new(),
        );

        let retrieval = coordinator.retrieve("Song", None).await.unwrap();

        assert_eq!(retrieval, Retrieval::Exhausted { attempted: 2 });
        assert_eq!(retrieval.into_text(), None);
    }

    #[tokio::test]
    async fn test_search_failure_propagates() {
        let searcher = MockWebSearcher::new().with_failure("quota exceeded");
        let coordinator =
            RetrievalCoordinator::new(searcher, MockFetcher::new(), RetrievalConfig::default());

        let err = coordinator.retrieve("Song", None).await.unwrap_err();

        assert!(matches!(err, PipelineError::SearchUnavailable(_)));
        assert!(coordinator.fetcher().fetched().is_empty());
    }
}
