//! Search candidates and domain buckets.

use url::Url;

/// A raw hit from the web-search API, before domain parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Link as returned by the API (not yet validated).
    pub url: String,

    /// Page title, if the API supplied one.
    pub title: Option<String>,
}

impl SearchHit {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// One lyric candidate: a parsed URL and the domain it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The candidate page.
    pub url: Url,

    /// Host with any leading `www.` removed, lower-cased.
    pub domain: String,

    /// Title from the search API.
    pub title: Option<String>,
}

impl SearchResult {
    /// Build from a parsed URL. Returns `None` for URLs without a host.
    pub fn new(url: Url) -> Option<Self> {
        let domain = domain_of(&url)?;
        Some(Self {
            url,
            domain,
            title: None,
        })
    }

    /// Create from a URL string.
    pub fn from_url(url: &str) -> Option<Self> {
        Url::parse(url).ok().and_then(Self::new)
    }

    /// Create from a raw search hit, keeping its title.
    pub fn from_hit(hit: &SearchHit) -> Option<Self> {
        let mut result = Self::from_url(&hit.url)?;
        result.title = hit.title.clone();
        Some(result)
    }
}

/// Domain of a URL: its host, lower-cased, without a leading `www.`.
pub fn domain_of(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    let domain = host.strip_prefix("www.").unwrap_or(&host);
    if domain.is_empty() {
        return None;
    }
    Some(domain.to_string())
}

/// Search results that share a domain, in search-rank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainBucket {
    pub domain: String,
    pub results: Vec<SearchResult>,
}

impl DomainBucket {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            results: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
