//! Deterministic fallback summarizer: split into sentences, drop fragments,
//! keep the longest few. Crude, but always available and good enough to give
//! the user something when no generation capability is configured.

use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_SUMMARY_SENTENCES: usize = 6;
pub const DEGRADED_SUMMARY_SENTENCES: usize = 5;

/// Fragments at or below this length are noise (headings, captions, stray
/// list markers), not sentences.
const MIN_SENTENCE_CHARS: usize = 30;

static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Split on terminal punctuation followed by whitespace, keeping the
/// punctuation with its sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let text = text.trim();
    let mut sentences = Vec::new();
    let mut last = 0;
    for m in SENTENCE_BREAK.find_iter(text) {
        // The punctuation mark is a single byte, so start + 1 is safe.
        let sentence = text[last..m.start() + 1].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        last = m.end();
    }
    let tail = text[last..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

/// Length-ranked extractive summary: the `max_sentences` longest sentences,
/// longest first.
pub fn summarize(text: &str, max_sentences: usize) -> String {
    let mut sentences: Vec<&str> = split_sentences(text)
        .into_iter()
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect();
    sentences.sort_by_key(|s| std::cmp::Reverse(s.chars().count()));
    sentences.truncate(max_sentences);
    sentences.join(" ")
}
