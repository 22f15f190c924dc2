//! Best-effort title recovery: og:title, then `<title>`, then the first
//! `<h1>`. Never fails; a page with no usable title gets an empty string.

use scraper::{Html, Selector};
use std::sync::LazyLock;

static OG_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta[property='og:title']").unwrap());
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());

pub fn extract_title(html: &str) -> String {
    let document = Html::parse_document(html);

    if let Some(element) = document.select(&OG_TITLE).next()
        && let Some(content) = element.value().attr("content")
    {
        let content = content.trim();
        if !content.is_empty() {
            return content.to_string();
        }
    }

    for selector in [&*TITLE, &*H1] {
        if let Some(element) = document.select(selector).next() {
            let text = element.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                return text;
            }
        }
    }

    String::new()
}
