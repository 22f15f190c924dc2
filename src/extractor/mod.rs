//! Article text extraction.
//!
//! Extraction runs an ordered list of strategies, most precise first. The
//! first strategy whose (whitespace-normalized) output clears its own length
//! bar wins. When none qualifies the page is treated as having no extractable
//! article at all, which is terminal: there is nothing to retry.

pub mod errors;
pub mod model;
pub mod strategy;
pub mod title;

#[cfg(test)]
mod tests;

pub use errors::ExtractError;
pub use model::ExtractedDocument;

use crate::fetcher::{FetchedPage, fetch};
use strategy::{DomTextStrategy, ExtractionStrategy, ReadabilityStrategy};
use tracing::{debug, instrument};

/// Extract an article from an already-fetched page.
pub fn extract(page: &FetchedPage) -> Result<ExtractedDocument, ExtractError> {
    // Title recovery is independent of the body strategies and never fails;
    // a page without a usable title yields an empty string.
    let title = title::extract_title(&page.html);

    let strategies: [&dyn ExtractionStrategy; 2] = [&ReadabilityStrategy, &DomTextStrategy];

    let mut best_chars = 0;
    for strategy in strategies {
        let Some(text) = strategy.extract(&page.html, &page.url_final) else {
            continue;
        };
        let text = model::normalize_whitespace(&text);
        let chars = text.chars().count();
        best_chars = best_chars.max(chars);
        if chars > strategy.min_chars() {
            debug!(strategy = strategy.name(), chars, "extraction succeeded");
            return Ok(ExtractedDocument {
                url: page.url_final.clone(),
                title,
                text,
                fetched_at: page.fetched_at,
            });
        }
        debug!(strategy = strategy.name(), chars, "below threshold");
    }

    Err(ExtractError::InsufficientContent { chars: best_chars })
}

/// Fetch a URL and extract its article in one step.
#[instrument(skip_all, fields(url = %url))]
pub async fn extract_url(url: &str) -> Result<ExtractedDocument, ExtractError> {
    let page = fetch(url).await?;
    extract(&page)
}
