//! Group search results by domain and order the groups.

use indexmap::IndexMap;

use crate::types::{DomainBucket, RetrievalConfig, SearchResult};

/// Partition results into per-domain buckets.
///
/// Excluded domains are dropped. Preferred domains come first, in the
/// configured order, followed by the rest in the order they were first seen.
/// Within a bucket, results keep their search-rank order.
pub fn partition(results: &[SearchResult], config: &RetrievalConfig) -> Vec<DomainBucket> {
    let mut by_domain: IndexMap<&str, DomainBucket> = IndexMap::new();

    for result in results {
        if config.is_excluded(&result.domain) {
            continue;
        }
        by_domain
            .entry(result.domain.as_str())
            .or_insert_with(|| DomainBucket::new(result.domain.as_str()))
            .results
            .push(result.clone());
    }

    let mut ordered = Vec::with_capacity(by_domain.len());
    for preferred in &config.preferred_domains {
        if let Some(bucket) = by_domain.shift_remove(preferred.as_str()) {
            ordered.push(bucket);
        }
    }
    ordered.extend(by_domain.into_values());

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(urls: &[&str]) -> Vec<SearchResult> {
        urls.iter()
            .map(|u| SearchResult::from_url(u).unwrap())
            .collect()
    }

    fn domains(buckets: &[DomainBucket]) -> Vec<&str> {
        buckets.iter().map(|b| b.domain.as_str()).collect()
    }

    #[test]
    fn test_preferred_first_then_encounter_order() {
        let input = results(&[
            "https://www.example.org/a",
            "https://www.lyrics.com/b",
            "https://other.net/c",
            "https://www.azlyrics.com/d",
            "https://www.lyrics.com/e",
        ]);

        let buckets = partition(&input, &RetrievalConfig::default());

        assert_eq!(
            domains(&buckets),
            vec!["azlyrics.com", "lyrics.com", "example.org", "other.net"]
        );
        let lyrics: Vec<_> = buckets[1].results.iter().map(|r| r.url.path()).collect();
        assert_eq!(lyrics, vec!["/b", "/e"]);
    }

    #[test]
    fn test_excluded_domain_and_subdomains_dropped() {
        let input = results(&[
            "https://genius.com/a",
            "https://m.genius.com/b",
            "https://www.songlyrics.com/c",
        ]);

        let buckets = partition(&input, &RetrievalConfig::default());

        assert_eq!(domains(&buckets), vec!["songlyrics.com"]);
    }

    #[test]
    fn test_no_results_means_no_buckets() {
        assert!(partition(&[], &RetrievalConfig::default()).is_empty());
    }

    #[test]
    fn test_every_result_kept_once() {
        let input = results(&[
            "https://a.com/1",
            "https://b.com/1",
            "https://a.com/2",
            "https://www.lyricfind.com/1",
        ]);

        let buckets = partition(&input, &RetrievalConfig::default());
        let total: usize = buckets.iter().map(DomainBucket::len).sum();

        assert_eq!(total, input.len());
        assert_eq!(domains(&buckets), vec!["lyricfind.com", "a.com", "b.com"]);
    }
}
