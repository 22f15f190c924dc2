//! Extraction strategies, ordered by precision.

use readability::extractor;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// One way of pulling article text out of an HTML document. Strategies are
/// tried in order; a result only wins if its trimmed character count exceeds
/// the strategy's own minimum.
pub trait ExtractionStrategy {
    fn name(&self) -> &'static str;
    /// Minimum character count for a result of this strategy to qualify.
    fn min_chars(&self) -> usize;
    fn extract(&self, html: &str, url: &Url) -> Option<String>;
}

/// Precision-first extraction via the readability algorithm. Suppresses
/// comments, tables and boilerplate but can come up short on unusual layouts,
/// hence the low bar and the fallback behind it.
pub struct ReadabilityStrategy;

impl ExtractionStrategy for ReadabilityStrategy {
    fn name(&self) -> &'static str {
        "readability"
    }

    fn min_chars(&self) -> usize {
        100
    }

    fn extract(&self, html: &str, url: &Url) -> Option<String> {
        let article = extractor::extract(&mut html.as_bytes(), url).ok()?;
        if article.text.trim().is_empty() {
            return None;
        }
        Some(article.text)
    }
}

/// Recall-first fallback: parse the DOM and concatenate the visible text of
/// paragraph, heading and list-item elements in document order, skipping
/// anything that lives inside navigation or other chrome.
pub struct DomTextStrategy;

static CONTENT_ELEMENTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p, h1, h2, h3, li").unwrap());

const CHROME_ELEMENTS: [&str; 7] = [
    "nav", "header", "footer", "aside", "form", "noscript", "iframe",
];

// Elements whose text content is never article prose, even when they sit
// inside a paragraph or list item.
const HIDDEN_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

impl ExtractionStrategy for DomTextStrategy {
    fn name(&self) -> &'static str {
        "dom-text"
    }

    fn min_chars(&self) -> usize {
        200
    }

    fn extract(&self, html: &str, _url: &Url) -> Option<String> {
        let document = Html::parse_document(html);

        let mut parts = Vec::new();
        for element in document.select(&CONTENT_ELEMENTS) {
            if inside_chrome(&element) {
                continue;
            }
            let text = visible_text(&element);
            let text = text.trim();
            if !text.is_empty() {
                parts.push(text.to_string());
            }
        }

        if parts.is_empty() {
            return None;
        }
        Some(parts.join(" "))
    }
}

fn inside_chrome(element: &ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| CHROME_ELEMENTS.contains(&a.value().name()))
}

/// The element's text with script/style/template payloads stripped, however
/// deeply they are nested.
fn visible_text(element: &ElementRef) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|a| HIDDEN_TEXT_ELEMENTS.contains(&a.value().name()));
        if !hidden {
            out.push_str(text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dom_extract(html: &str) -> Option<String> {
        let url = Url::parse("https://example.com/a").unwrap();
        DomTextStrategy.extract(html, &url)
    }

    #[test]
    fn concatenates_in_document_order() {
        let html = r#"<html><body>
            <h1>Heading</h1>
            <p>Paragraph A.</p>
            <p>Paragraph B.</p>
            <li>Item</li>
        </body></html>"#;
        assert_eq!(
            dom_extract(html).unwrap(),
            "Heading Paragraph A. Paragraph B. Item"
        );
    }

    #[test]
    fn skips_navigation_and_footer_text() {
        let html = r#"<html><body>
            <nav><li>Home</li><li>About</li></nav>
            <p>Body text.</p>
            <footer><p>Copyright notice.</p></footer>
        </body></html>"#;
        assert_eq!(dom_extract(html).unwrap(), "Body text.");
    }

    #[test]
    fn inline_script_and_style_bodies_do_not_leak() {
        let html = r#"<html><body>
            <p>Real prose here.<script>var tracker = 1;</script> More prose.</p>
            <li>Item<style>.a { color: red }</style> text</li>
        </body></html>"#;
        let text = dom_extract(html).unwrap();
        assert!(!text.contains("var tracker"));
        assert!(!text.contains("color: red"));
        assert!(text.contains("Real prose here."));
        assert!(text.contains("More prose."));
        assert!(text.contains("Item"));
    }

    #[test]
    fn none_when_no_content_elements() {
        let html = "<html><body><div>bare div text</div></body></html>";
        assert_eq!(dom_extract(html), None);
    }
}
