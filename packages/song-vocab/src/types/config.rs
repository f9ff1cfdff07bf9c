//! Retrieval configuration.

/// Lyric sites tried first, in this order.
pub const PREFERRED_DOMAINS: [&str; 5] = [
    "azlyrics.com",
    "lyricfind.com",
    "metrolyrics.com",
    "songlyrics.com",
    "lyrics.com",
];

/// Never fetched (it renders lyrics client-side).
pub const EXCLUDED_DOMAIN: &str = "genius.com";

/// The search API returns at most ten results per request.
pub const MAX_SEARCH_RESULTS: usize = 10;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Knobs for searching and lyric extraction.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Domains tried first, and the `site:` filters in the query
    pub preferred_domains: Vec<String>,

    /// Domain (and its subdomains) never fetched
    pub excluded_domain: String,

    /// Search results requested; clamped to 1..=10
    pub max_results: usize,

    /// Extracted text must be longer than this many characters
    pub min_lyric_chars: usize,

    /// A `<pre>` block must be longer than this to count as lyrics
    pub min_preformatted_chars: usize,

    /// Browser User-Agent sent with page fetches
    pub user_agent: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            preferred_domains: PREFERRED_DOMAINS.iter().map(|d| d.to_string()).collect(),
            excluded_domain: EXCLUDED_DOMAIN.to_string(),
            max_results: MAX_SEARCH_RESULTS,
            min_lyric_chars: 50,
            min_preformatted_chars: 100,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl RetrievalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set preferred domains.
    pub fn with_preferred_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_excluded_domain(mut self, domain: impl Into<String>) -> Self {
        self.excluded_domain = domain.into();
        self
    }

    /// Set the result cap (clamped to what the search API allows).
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max.clamp(1, MAX_SEARCH_RESULTS);
        self
    }

    pub fn with_min_lyric_chars(mut self, min: usize) -> Self {
        self.min_lyric_chars = min;
        self
    }

    pub fn with_min_preformatted_chars(mut self, min: usize) -> Self {
        self.min_preformatted_chars = min;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Whether `domain` is the excluded domain or one of its subdomains.
    pub fn is_excluded(&self, domain: &str) -> bool {
        let excluded = self.excluded_domain.as_str();
        if excluded.is_empty() {
            return false;
        }
        domain == excluded
            || domain
                .strip_suffix(excluded)
                .map_or(false, |prefix| prefix.ends_with('.'))
    }

    /// Whether `domain` is one of the preferred domains.
    pub fn is_preferred(&self, domain: &str) -> bool {
        self.preferred_domains.iter().any(|d| d == domain)
    }
}
