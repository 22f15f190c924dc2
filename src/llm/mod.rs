//! Text-generation capability.
//!
//! The remote/local duality is decided exactly once, when the backend is
//! built from configuration. Everything downstream (notes generation, chat)
//! matches on the backend instead of re-checking for an API key at each call
//! site.

pub mod openai;

pub use openai::OpenAiClient;

use crate::config::Config;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("llm transport error: {0}")]
    Transport(String),

    #[error("llm api error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("llm response contained no choices")]
    EmptyResponse,
}

/// The generation capability as configured for this process.
pub enum Backend {
    /// A remote OpenAI-compatible chat endpoint.
    Remote(OpenAiClient),
    /// No capability configured; callers use their deterministic heuristics.
    Local,
}

impl Backend {
    pub fn from_config(config: &Config) -> Self {
        match config.openai_api_key() {
            Some(key) => Backend::Remote(
                OpenAiClient::new(key)
                    .with_model(config.openai_model())
                    .with_base_url(config.openai_base_url()),
            ),
            None => Backend::Local,
        }
    }
}
