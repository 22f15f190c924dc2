//! Follow-up questions against the most recently extracted document.
//!
//! Remote mode asks the configured model, grounding it in a bounded prefix
//! of the document. Local mode is a keyword-window scan: first occurrence
//! per question token, a fixed-size window of surrounding text, no ranking
//! and no window deduplication. Either way the caller gets a string, never
//! an error.

use crate::llm::{Backend, LlmError, OpenAiClient};
use crate::notes::prompt::char_prefix;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{instrument, warn};

/// How much document context the remote prompt carries.
const DOC_PREFIX_CHARS: usize = 30_000;
const CHAT_MAX_TOKENS: u32 = 800;
const CHAT_TEMPERATURE: f32 = 0.1;

const MAX_KEYWORDS: usize = 6;
const MIN_KEYWORD_CHARS: usize = 4;
const WINDOW_BEFORE: usize = 200;
const WINDOW_CHARS: usize = 400;
const MAX_WINDOWS: usize = 3;
const WINDOW_SEPARATOR: &str = "\n\n---\n\n";

const CHAT_SYSTEM: &str = "You are a helpful tutor.";

/// What the model is told to say when the document lacks the answer.
pub const NOT_IN_DOCUMENT: &str = "Not stated in document.";

/// Fixed local-mode reply when no question token appears in the document.
pub const CANNOT_ANSWER: &str =
    "Cannot answer from the current document. Try rephrasing the question with terms from the article.";

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]+").unwrap());

/// One question/answer exchange. History is append-only; nothing expires.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub q: String,
    pub a: String,
}

/// Per-session chat history, rendered most recent first.
#[derive(Debug, Default)]
pub struct ChatSession {
    turns: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, q: impl Into<String>, a: impl Into<String>) {
        self.turns.push(ChatTurn {
            q: q.into(),
            a: a.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Up to `n` most recent turns, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ChatTurn> {
        self.turns.iter().rev().take(n)
    }
}

/// Answer a follow-up question about `doc_text`.
#[instrument(skip_all, fields(question = %question))]
pub async fn respond(backend: &Backend, question: &str, doc_text: &str) -> String {
    match backend {
        Backend::Local => local_answer(question, doc_text),
        Backend::Remote(client) => match remote_answer(client, question, doc_text).await {
            Ok(answer) => answer,
            Err(err) => {
                warn!(error = %err, "remote chat failed, degrading to keyword search");
                local_answer(question, doc_text)
            }
        },
    }
}

async fn remote_answer(
    client: &OpenAiClient,
    question: &str,
    doc_text: &str,
) -> Result<String, LlmError> {
    let context = char_prefix(doc_text, DOC_PREFIX_CHARS);
    let prompt = format!(
        r#"You are an expert tutor. Use the provided document context to answer the question concisely. If the document does not contain the answer, say "{NOT_IN_DOCUMENT}"

Document (short excerpt or entirety):
"""
{context}
"""

Question: {question}
Answer in 2-8 sentences, cite the part of the document if possible."#
    );

    client
        .chat(CHAT_SYSTEM, &prompt, CHAT_MAX_TOKENS, CHAT_TEMPERATURE)
        .await
}

/// Keyword-window fallback: first occurrence per token, fixed windows,
/// joined in token order.
fn local_answer(question: &str, doc_text: &str) -> String {
    let keywords: Vec<&str> = WORD
        .find_iter(question)
        .map(|m| m.as_str())
        .filter(|w| w.chars().count() >= MIN_KEYWORD_CHARS)
        .take(MAX_KEYWORDS)
        .collect();

    let mut windows = Vec::new();
    for keyword in keywords {
        if windows.len() >= MAX_WINDOWS {
            break;
        }
        if let Some(window) = first_window(doc_text, keyword) {
            windows.push(window);
        }
    }

    if windows.is_empty() {
        return CANNOT_ANSWER.to_string();
    }
    format!(
        "Found related passages:\n\n{}",
        windows.join(WINDOW_SEPARATOR)
    )
}

/// The text window around the first case-insensitive occurrence of
/// `keyword` in `doc_text`. Window bounds are counted in characters so
/// non-ASCII documents get the same amount of context as ASCII ones.
fn first_window<'a>(doc_text: &'a str, keyword: &str) -> Option<&'a str> {
    let re = Regex::new(&format!("(?i){}", regex::escape(keyword))).ok()?;
    let hit = re.find(doc_text)?;

    let start = chars_back(doc_text, hit.start(), WINDOW_BEFORE);
    let end = chars_forward(doc_text, start, WINDOW_CHARS);
    Some(&doc_text[start..end])
}

/// Byte index of the position `count` characters before `from`, clamped to
/// the start of the string.
fn chars_back(s: &str, from: usize, count: usize) -> usize {
    let mut idx = from;
    for (i, _) in s[..from].char_indices().rev().take(count) {
        idx = i;
    }
    idx
}

/// Byte index of the position `count` characters after `start`, clamped to
/// the end of the string.
fn chars_forward(s: &str, start: usize, count: usize) -> usize {
    s[start..]
        .char_indices()
        .nth(count)
        .map(|(i, _)| start + i)
        .unwrap_or(s.len())
}
