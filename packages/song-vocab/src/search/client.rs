//! Lyric-oriented search: builds the site-restricted query and parses hits.

use tracing::{debug, info};

use crate::error::Result;
use crate::traits::WebSearcher;
use crate::types::{RetrievalConfig, SearchResult};

/// Build the search query for a song.
///
/// `"<song> lyrics [<artist>] site:a OR site:b ..."`
pub fn build_query(song_name: &str, artist_name: Option<&str>, sites: &[String]) -> String {
    let mut query = format!("{} lyrics", song_name.trim());

    if let Some(artist) = artist_name.map(str::trim).filter(|a| !a.is_empty()) {
        query.push(' ');
        query.push_str(artist);
    }

    if !sites.is_empty() {
        let filter = sites
            .iter()
            .map(|site| format!("site:{}", site))
            .collect::<Vec<_>>()
            .join(" OR ");
        query.push(' ');
        query.push_str(&filter);
    }

    query
}

/// Runs lyric searches against any [`WebSearcher`].
pub struct SearchClient<S> {
    searcher: S,
    config: RetrievalConfig,
}

impl<S: WebSearcher> SearchClient<S> {
    pub fn new(searcher: S, config: RetrievalConfig) -> Self {
        Self { searcher, config }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn searcher(&self) -> &S {
        &self.searcher
    }

    /// Search for lyric pages. Hits with unparseable URLs are dropped.
    pub async fn query(
        &self,
        song_name: &str,
        artist_name: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        let query = build_query(song_name, artist_name, &self.config.preferred_domains);
        info!(query = %query, "Searching for lyrics");

        let hits = self.searcher.search(&query, self.config.max_results).await?;

        let results: Vec<SearchResult> = hits
            .iter()
            .filter_map(|hit| {
                let result = SearchResult::from_hit(hit);
                if result.is_none() {
                    debug!(url = %hit.url, "Dropping unparseable search hit");
                }
                result
            })
            .take(self.config.max_results)
            .collect();

        info!(count = results.len(), "Search returned candidates");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockWebSearcher;
    use crate::types::SearchHit;

    fn sites() -> Vec<String> {
        vec!["azlyrics.com".to_string(), "lyrics.com".to_string()]
    }

    #[test]
    fn test_query_with_artist() {
        assert_eq!(
            build_query("Yesterday", Some("The Beatles"), &sites()),
            "Yesterday lyrics The Beatles site:azlyrics.com OR site:lyrics.com"
        );
    }

    #[test]
    fn test_query_without_artist() {
        assert_eq!(
            build_query("Yesterday", None, &sites()),
            "Yesterday lyrics site:azlyrics.com OR site:lyrics.com"
        );
        assert_eq!(
            build_query("Yesterday", Some("  "), &[]),
            "Yesterday lyrics"
        );
    }

    #[tokio::test]
    async fn test_query_parses_and_caps() {
        let hits: Vec<SearchHit> = (0..12)
            .map(|i| SearchHit::new(format!("https://www.lyrics.com/lyric/{}", i)))
            .chain(std::iter::once(SearchHit::new("::bad::")))
            .collect();
        let searcher = MockWebSearcher::new().with_hits(hits);
        let client = SearchClient::new(searcher, RetrievalConfig::default());

        let results = client.query("Song", Some("Artist")).await.unwrap();

        assert_eq!(results.len(), 10);
        assert!(results.iter().all(|r| r.domain == "lyrics.com"));
        assert_eq!(client.searcher().queries().len(), 1);
        assert!(client.searcher().queries()[0].starts_with("Song lyrics Artist site:azlyrics.com"));
    }
}
