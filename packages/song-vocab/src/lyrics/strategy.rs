//! Lyric extraction strategies.
//!
//! Each strategy looks at a parsed page and either returns candidate text or
//! gives up. The extractor runs them in order and keeps the first candidate
//! long enough to be lyrics.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use super::render::TextRenderer;
use crate::types::RetrievalConfig;

lazy_static! {
    /// Footer text AZLyrics places after the lyric body.
    static ref AZ_BOILERPLATE: Regex = Regex::new(
        r"(?i)\(function\(\)\{var\s*az\s*=\s*\{\};az\.ad\.|Submit Corrections|AZLyrics\.com"
    )
    .expect("valid regex");
}

const AZ_MARKER: &str = "Usage of azlyrics.com content";

const COMMON_SELECTORS: &[&str] = &[
    r#"div[class*="lyrics"]"#,
    "div.lyrics",
    "p.lyrics",
    "#lyrics",
    ".lyrics-body",
    ".lyrics-text",
    r#"div[itemprop="description"]"#,
];

/// One way of finding lyrics in a page.
pub trait LyricStrategy: Send + Sync {
    /// Short name, recorded on the resulting document.
    fn name(&self) -> &'static str;

    /// Whether to try this strategy for a page on `domain`.
    fn applies_to(&self, _domain: &str) -> bool {
        true
    }

    /// Candidate text, or `None` if nothing matched.
    fn extract(&self, document: &Html) -> Option<String>;
}

/// Site-specific: text following an HTML comment marker.
pub struct MarkerStrategy {
    domain: String,
    marker: String,
}

impl MarkerStrategy {
    pub fn new(domain: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            marker: marker.into(),
        }
    }

    /// AZLyrics puts its lyrics right after a licensing comment.
    pub fn azlyrics() -> Self {
        Self::new("azlyrics.com", AZ_MARKER)
    }
}

impl LyricStrategy for MarkerStrategy {
    fn name(&self) -> &'static str {
        "site-marker"
    }

    fn applies_to(&self, domain: &str) -> bool {
        domain == self.domain
            || domain
                .strip_suffix(self.domain.as_str())
                .map_or(false, |prefix| prefix.ends_with('.'))
    }

    fn extract(&self, document: &Html) -> Option<String> {
        for node in document.tree.root().descendants() {
            let Node::Comment(comment) = node.value() else {
                continue;
            };
            if !comment.comment.contains(self.marker.as_str()) {
                continue;
            }

            // Content that follows the marker inside its container
            let mut renderer = TextRenderer::new();
            for sibling in node.next_siblings() {
                match sibling.value() {
                    Node::Text(text) => renderer.push_text(&text.text),
                    Node::Element(_) => {
                        if let Some(element) = ElementRef::wrap(sibling) {
                            renderer.push_element(element);
                        }
                    }
                    _ => {}
                }
            }
            let mut text = renderer.finish();

            // Otherwise the next div after the marker's container
            if text.is_empty() {
                let next_div = node
                    .parent()
                    .into_iter()
                    .flat_map(|parent| parent.next_siblings())
                    .filter_map(ElementRef::wrap)
                    .find(|element| element.value().name() == "div");
                if let Some(div) = next_div {
                    text = TextRenderer::render(div);
                }
            }

            let text = AZ_BOILERPLATE
                .split(&text)
                .next()
                .unwrap_or_default()
                .trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
        None
    }
}

/// Generic: first non-empty container matching a list of CSS selectors.
pub struct SelectorStrategy {
    selectors: Vec<Selector>,
}

impl SelectorStrategy {
    /// Selectors are tried in order. Invalid selectors are ignored.
    pub fn new<'a>(selectors: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            selectors: selectors
                .into_iter()
                .filter_map(|s| Selector::parse(s).ok())
                .collect(),
        }
    }

    /// Class and id names lyric sites commonly use.
    pub fn common() -> Self {
        Self::new(COMMON_SELECTORS.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl LyricStrategy for SelectorStrategy {
    fn name(&self) -> &'static str {
        "common-selector"
    }

    fn extract(&self, document: &Html) -> Option<String> {
        self.selectors.iter().find_map(|selector| {
            let container = document.select(selector).next()?;
            let text = TextRenderer::render(container);
            (!text.is_empty()).then_some(text)
        })
    }
}

/// Fallback: the longest `<pre>` block, if long enough.
pub struct LongestBlockStrategy {
    min_chars: usize,
}

impl LongestBlockStrategy {
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }
}

lazy_static! {
    static ref PRE: Selector = Selector::parse("pre").expect("valid selector");
}

impl LyricStrategy for LongestBlockStrategy {
    fn name(&self) -> &'static str {
        "longest-pre"
    }

    fn extract(&self, document: &Html) -> Option<String> {
        document
            .select(&PRE)
            .map(TextRenderer::render)
            .max_by_key(|text| text.chars().count())
            .filter(|text| text.chars().count() > self.min_chars)
    }
}

/// Site-specific, then generic selectors, then the longest block.
pub fn default_chain(config: &RetrievalConfig) -> Vec<Box<dyn LyricStrategy>> {
    vec![
        Box::new(MarkerStrategy::azlyrics()),
        Box::new(SelectorStrategy::common()),
        Box::new(LongestBlockStrategy::new(config.min_preformatted_chars)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const AZ_PAGE: &str = r#"<html><body>
        <div class="container main-page">
          <div class="col-xs-12 text-center">
            <div class="ringtone"></div>
            <b>"Bohemian Rhapsody"</b>
            <div>
            <!-- Usage of azlyrics.com content by any third-party lyrics provider is prohibited by our licensing agreement. Sorry about that. -->
            Is this the real life?<br>
            Is this just fantasy?<br>
            Caught in a landslide,<br>
            No escape from reality<br>
            </div>
            <div class="noprint">Submit Corrections</div>
          </div>
        </div>
        </body></html>"#;

    #[test]
    fn test_marker_reads_following_content() {
        let document = Html::parse_document(AZ_PAGE);
        let text = MarkerStrategy::azlyrics().extract(&document).unwrap();

        assert!(text.starts_with("Is this the real life?\nIs this just fantasy?"));
        assert!(text.ends_with("No escape from reality"));
        assert!(!text.contains("Submit"));
    }

    #[test]
    fn test_marker_falls_back_to_next_div() {
        let html = r#"<html><body>
            <div><!-- Usage of azlyrics.com content is prohibited --></div>
            <span>ad</span>
            <div>Mama, just killed a man<br>Put a gun against his head<br>AZLyrics.com footer</div>
            </body></html>"#;
        let document = Html::parse_document(html);
        let text = MarkerStrategy::azlyrics().extract(&document).unwrap();

        assert_eq!(text, "Mama, just killed a man\nPut a gun against his head");
    }

    #[test]
    fn test_marker_applies_only_to_its_domain() {
        let strategy = MarkerStrategy::azlyrics();
        assert!(strategy.applies_to("azlyrics.com"));
        assert!(strategy.applies_to("search.azlyrics.com"));
        assert!(!strategy.applies_to("lyrics.com"));
        assert!(!strategy.applies_to("notazlyrics.com"));
    }

    #[test]
    fn test_marker_missing() {
        let document = Html::parse_document("<div>no comment here</div>");
        assert!(MarkerStrategy::azlyrics().extract(&document).is_none());
    }

    #[test]
    fn test_selector_skips_empty_matches() {
        let html = r#"<div class="lyrics-header"></div>
            <div id="lyrics">Scaramouche, Scaramouche<br>will you do the Fandango</div>"#;
        let document = Html::parse_document(html);
        let text = SelectorStrategy::common().extract(&document).unwrap();

        assert_eq!(text, "Scaramouche, Scaramouche\nwill you do the Fandango");
    }

    #[test]
    fn test_selector_order_wins() {
        let html = r#"<p class="lyrics">paragraph</p><div class="song-lyrics">div wins</div>"#;
        let document = Html::parse_document(html);
        assert_eq!(
            SelectorStrategy::common().extract(&document).as_deref(),
            Some("div wins")
        );
    }

    #[test]
    fn test_invalid_selectors_ignored() {
        let strategy = SelectorStrategy::new(["div[", "p"]);
        assert_eq!(strategy.len(), 1);
    }

    #[test]
    fn test_longest_pre_threshold() {
        let long = "la ".repeat(40);
        let html = format!("<pre>short</pre><pre>{}</pre>", long);
        let document = Html::parse_document(&html);

        let text = LongestBlockStrategy::new(100).extract(&document).unwrap();
        assert_eq!(text, long.trim_end());

        assert!(LongestBlockStrategy::new(500).extract(&document).is_none());
    }

    #[test]
    fn test_default_chain_order() {
        let chain = default_chain(&RetrievalConfig::default());
        let names: Vec<_> = chain.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["site-marker", "common-selector", "longest-pre"]);
    }
}
