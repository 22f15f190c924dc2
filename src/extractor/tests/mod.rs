use chrono::Utc;
use reqwest::StatusCode;
use std::fs;
use url::Url;

use crate::extractor::{ExtractError, extract};
use crate::fetcher::types::FetchedPage;

fn page(html: impl Into<String>, url: &str) -> FetchedPage {
    FetchedPage {
        url_final: Url::parse(url).unwrap(),
        status: StatusCode::OK,
        html: html.into(),
        fetched_at: Utc::now(),
    }
}

#[test]
fn extracts_article_fixture() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/article.html")
        .expect("Failed to read test fixture");

    let doc = extract(&page(html, "https://example.com/article")).unwrap();

    assert_eq!(doc.title, "Sample Article");
    assert!(doc.text.contains("first paragraph"));
    assert!(doc.text.contains("second paragraph"));
    assert!(doc.text.contains("third paragraph"));
    // Script/style payloads never leak into article text.
    assert!(!doc.text.contains("console.log"));
    assert!(!doc.text.contains("font-family"));
}

#[test]
fn rejects_empty_shell_page() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/empty.html")
        .expect("Failed to read test fixture");

    let result = extract(&page(html, "https://example.com/empty"));
    assert!(matches!(
        result,
        Err(ExtractError::InsufficientContent { .. })
    ));
}

#[test]
fn rejects_short_text() {
    // Well-formed but nowhere near the content threshold.
    let html = "<html><head><title>Lorem</title></head><body><p>Lorem ipsum dolor sit amet, consectetur.</p></body></html>";
    let result = extract(&page(html, "https://example.com/short"));
    assert!(matches!(
        result,
        Err(ExtractError::InsufficientContent { .. })
    ));
}

#[test]
fn accepts_minimal_valid_content() {
    let body = "This is a valid article with enough content to pass the minimum requirements for extraction. ".repeat(10);
    let html = format!(
        r#"<!DOCTYPE html><html><head><title>Valid Article</title></head><body><article><h1>Valid Article</h1><p>{body}</p></article></body></html>"#
    );

    let doc = extract(&page(html, "https://example.com/valid")).unwrap();
    assert_eq!(doc.title, "Valid Article");
    assert!(doc.text.chars().count() > 200);
}

#[test]
fn missing_title_yields_empty_string() {
    let body = "Articles without any title tag at all still extract perfectly well. ".repeat(10);
    let html = format!("<html><body><p>{body}</p></body></html>");

    let doc = extract(&page(html, "https://example.com/untitled")).unwrap();
    assert_eq!(doc.title, "");
    assert!(!doc.text.is_empty());
}

#[test]
fn handles_malformed_html() {
    let filler = "Plenty of unclosed but readable prose follows here in this paragraph. ".repeat(10);
    let html = format!("<html><head><title>Broken</title><body><p>{filler}<div>More content");

    let doc = extract(&page(html, "https://example.com/broken")).unwrap();
    assert_eq!(doc.title, "Broken");
    assert!(doc.text.contains("readable prose"));
}
