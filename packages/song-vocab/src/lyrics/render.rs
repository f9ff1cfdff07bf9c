//! HTML to plain text, keeping line structure.
//!
//! `<br>` and block boundaries become line breaks, inline whitespace
//! collapses to single spaces, and `<pre>` content is copied as-is.
//! Script-like elements are skipped entirely.

use scraper::{ElementRef, Node};

const SKIPPED: &[&str] = &["script", "style", "noscript", "template", "iframe", "head"];

const BLOCKS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "footer", "form",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre",
    "section", "table", "tr", "ul",
];

/// Accumulates text from elements and loose text nodes.
#[derive(Debug, Default)]
pub struct TextRenderer {
    out: String,
    pending_space: bool,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a single element.
    pub fn render(element: ElementRef<'_>) -> String {
        let mut renderer = Self::new();
        renderer.push_element(element);
        renderer.finish()
    }

    /// Append an inline text run, collapsing whitespace.
    pub fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                self.pending_space = true;
                continue;
            }
            if self.pending_space && !self.at_line_start() && !self.out.ends_with(' ') {
                self.out.push(' ');
            }
            self.pending_space = false;
            self.out.push(ch);
        }
    }

    /// Append an element and everything under it.
    pub fn push_element(&mut self, element: ElementRef<'_>) {
        self.walk(element, false);
    }

    /// Consume the renderer, returning text with trailing spaces stripped
    /// from each line and surrounding whitespace trimmed.
    pub fn finish(self) -> String {
        self.out
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    fn walk(&mut self, element: ElementRef<'_>, preformatted: bool) {
        let name = element.value().name();

        if SKIPPED.contains(&name) {
            return;
        }
        if name == "br" {
            self.line_break();
            return;
        }

        let block = BLOCKS.contains(&name);
        let preformatted = preformatted || name == "pre";

        if block {
            self.block_boundary();
        }

        for child in element.children() {
            match child.value() {
                Node::Text(text) => {
                    if preformatted {
                        self.push_raw(&text.text);
                    } else {
                        self.push_text(&text.text);
                    }
                }
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.walk(child, preformatted);
                    }
                }
                _ => {}
            }
        }

        if block {
            self.block_boundary();
        }
    }

    fn push_raw(&mut self, text: &str) {
        if self.pending_space && !self.at_line_start() {
            self.out.push(' ');
        }
        self.pending_space = false;
        self.out.push_str(text);
    }

    fn line_break(&mut self) {
        self.pending_space = false;
        self.out.push('\n');
    }

    fn block_boundary(&mut self) {
        self.pending_space = false;
        if !self.at_line_start() {
            self.out.push('\n');
        }
    }

    fn at_line_start(&self) -> bool {
        self.out.is_empty() || self.out.ends_with('\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn render_first(html: &str, selector: &str) -> String {
        let document = Html::parse_document(html);
        let selector = Selector::parse(selector).unwrap();
        let element = document.select(&selector).next().unwrap();
        TextRenderer::render(element)
    }

    #[test]
    fn test_br_becomes_newline() {
        let text = render_first(
            "<div id='l'>Is this the real life?<br>\n  Is this   just fantasy?<br></div>",
            "#l",
        );
        assert_eq!(text, "Is this the real life?\nIs this just fantasy?");
    }

    #[test]
    fn test_double_br_keeps_stanza_gap() {
        let text = render_first("<div id='l'>one<br><br>two</div>", "#l");
        assert_eq!(text, "one\n\ntwo");
    }

    #[test]
    fn test_blocks_split_lines_and_scripts_skipped() {
        let text = render_first(
            "<div id='l'><p>first <b>line</b></p><script>var x = 1;</script><p>second</p></div>",
            "#l",
        );
        assert_eq!(text, "first line\nsecond");
    }

    #[test]
    fn test_pre_keeps_structure() {
        let text = render_first("<pre>  a  b\n\n  c</pre>", "pre");
        assert_eq!(text, "a  b\n\n  c");
    }
}
