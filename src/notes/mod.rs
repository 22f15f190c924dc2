//! Study-notes generation.
//!
//! `generate` is infallible by contract: the remote path degrades to the
//! local summarizer on any call or parse failure, and the local path is pure
//! string work. Callers always get a `NotesPack` whose `raw_text` equals the
//! input document text.

pub mod local;
pub mod model;
pub mod parse;
pub mod prompt;

pub use model::{Definition, Flashcard, Mcq, NotesPack, QaPair};

use crate::config::Config;
use crate::llm::{Backend, LlmError, OpenAiClient};
use thiserror::Error;
use tracing::{instrument, warn};

/// How much a single generation call may spend.
#[derive(Debug, Clone, Copy)]
pub struct Budget {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Budget {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_tokens: config.max_tokens(),
            temperature: config.temperature(),
        }
    }
}

// Failures on the remote path. These never escape `generate`; they are
// logged and answered with a degraded local pack.
#[derive(Error, Debug)]
enum RemoteError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("generation output was not parseable JSON: {0}")]
    Parse(String),
}

/// Produce a notes pack for an extracted document.
#[instrument(skip_all, fields(title = %title, chars = text.chars().count()))]
pub async fn generate(backend: &Backend, budget: Budget, text: &str, title: &str) -> NotesPack {
    let pack = match backend {
        Backend::Local => local_pack(text),
        Backend::Remote(client) => match remote_generate(client, budget, text, title).await {
            Ok(pack) => pack,
            Err(err) => {
                warn!(error = %err, "remote generation failed, degrading to local summary");
                degraded_pack(text)
            }
        },
    };

    for issue in pack.audit() {
        warn!(%issue, "notes pack failed validity check");
    }
    pack
}

async fn remote_generate(
    client: &OpenAiClient,
    budget: Budget,
    text: &str,
    title: &str,
) -> Result<NotesPack, RemoteError> {
    let user_prompt = prompt::notes_prompt(title, text);
    let raw = client
        .chat(
            prompt::NOTES_SYSTEM,
            &user_prompt,
            budget.max_tokens,
            budget.temperature,
        )
        .await?;

    let mut pack = parse::notes_from_response(&raw).map_err(RemoteError::Parse)?;
    // The model is never trusted to echo the document back.
    pack.raw_text = text.to_string();
    Ok(pack)
}

/// Deterministic pack for when no remote capability is configured.
fn local_pack(text: &str) -> NotesPack {
    let summary = local::summarize(text, local::DEFAULT_SUMMARY_SENTENCES);
    NotesPack {
        bullets: vec![summary.clone()],
        summary,
        raw_text: text.to_string(),
        ..NotesPack::default()
    }
}

/// Minimal pack for when the remote path failed mid-flight: a local summary
/// and nothing else, so the caller still ends the interaction with a result.
fn degraded_pack(text: &str) -> NotesPack {
    NotesPack {
        summary: local::summarize(text, local::DEGRADED_SUMMARY_SENTENCES),
        raw_text: text.to_string(),
        ..NotesPack::default()
    }
}
