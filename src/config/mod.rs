//! Configuration handling for the application.
//!
//! Everything is read once from the environment at startup and passed into
//! the pipeline explicitly; no component does ambient `env::var` lookups of
//! its own. The OpenAI key is deliberately optional: its absence selects the
//! local heuristic mode rather than failing startup.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable names. Public so tests and tooling can refer to them.
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_MAX_TOKENS: &str = "STUDYPACK_MAX_TOKENS";
pub const ENV_TEMPERATURE: &str = "STUDYPACK_TEMPERATURE";

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MAX_TOKENS: u32 = 1200;
const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    openai_api_key: Option<String>,
    openai_model: String,
    openai_base_url: String,
    max_tokens: u32,
    temperature: f32,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        openai_api_key: Option<String>,
        openai_model: impl Into<String>,
        openai_base_url: impl Into<String>,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            openai_api_key,
            openai_model: openai_model.into(),
            openai_base_url: openai_base_url.into(),
            max_tokens,
            temperature,
        }
    }

    /// Load from environment variables, falling back to defaults.
    ///
    /// A missing `OPENAI_API_KEY` is not an error; it only disables remote
    /// generation. Unparseable numeric overrides fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let openai_api_key = env::var(ENV_OPENAI_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty());
        let openai_model =
            env::var(ENV_OPENAI_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let openai_base_url = env::var(ENV_OPENAI_BASE_URL)
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let max_tokens = env::var(ENV_MAX_TOKENS)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);
        let temperature = env::var(ENV_TEMPERATURE)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);
        // Placeholder spot for future validation hooks.
        Ok(Self {
            openai_api_key,
            openai_model,
            openai_base_url,
            max_tokens,
            temperature,
        })
    }

    /// Optional OpenAI API key; `None` selects local fallback mode.
    pub fn openai_api_key(&self) -> Option<&str> {
        self.openai_api_key.as_deref()
    }
    /// Chat model identifier sent to the completion endpoint.
    pub fn openai_model(&self) -> &str {
        &self.openai_model
    }
    /// Base URL of the OpenAI-compatible API (no trailing slash).
    pub fn openai_base_url(&self) -> &str {
        &self.openai_base_url
    }
    /// Token budget for notes generation.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
    /// Sampling temperature for notes generation.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Defaults with no key configured (mirrors `from_env` with no overrides).
    pub fn local() -> Self {
        Self::new(
            None,
            DEFAULT_MODEL,
            DEFAULT_BASE_URL,
            DEFAULT_MAX_TOKENS,
            DEFAULT_TEMPERATURE,
        )
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Reserved for future validation failures.
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_OPENAI_API_KEY,
            ENV_OPENAI_MODEL,
            ENV_OPENAI_BASE_URL,
            ENV_MAX_TOKENS,
            ENV_TEMPERATURE,
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_when_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.openai_api_key(), None);
        assert_eq!(cfg.openai_model(), DEFAULT_MODEL);
        assert_eq!(cfg.openai_base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.max_tokens(), DEFAULT_MAX_TOKENS);
        assert_eq!(cfg.temperature(), DEFAULT_TEMPERATURE);
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_OPENAI_API_KEY, "sk-test");
            env::set_var(ENV_OPENAI_MODEL, "gpt-4o");
            env::set_var(ENV_OPENAI_BASE_URL, "http://localhost:9999/v1/");
            env::set_var(ENV_MAX_TOKENS, "512");
            env::set_var(ENV_TEMPERATURE, "0.7");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.openai_api_key(), Some("sk-test"));
        assert_eq!(cfg.openai_model(), "gpt-4o");
        // Trailing slash is trimmed so endpoint joins stay predictable.
        assert_eq!(cfg.openai_base_url(), "http://localhost:9999/v1");
        assert_eq!(cfg.max_tokens(), 512);
        assert_eq!(cfg.temperature(), 0.7);
        clear_env();
    }

    #[test]
    fn blank_key_counts_as_absent() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_OPENAI_API_KEY, "   ");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.openai_api_key(), None);
        clear_env();
    }
}
