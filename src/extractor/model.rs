use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

/// The extracted article. Immutable once produced; the notes generator and
/// the chat responder both read from it, neither mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub url: Url,
    /// Possibly empty; a missing title is not an extraction failure.
    pub title: String,
    pub text: String,
    pub fetched_at: DateTime<Utc>,
}

static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// Collapse runs of spaces/tabs and squeeze blank-line runs down to a single
/// paragraph break, preserving intentional newlines.
pub fn normalize_whitespace(text: &str) -> String {
    let spaced = SPACE_RUNS.replace_all(text.trim(), " ");
    NEWLINE_RUNS.replace_all(&spaced, "\n\n").to_string()
}
