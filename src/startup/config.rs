//! Runtime configuration.
//!
//! Everything is read from the environment once at startup.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `CLAUDE_API_KEY` | `api_key` | required |
//! | `GPT_TERM_API_URL` | `api_url` | [`DEFAULT_API_URL`] |
//! | `GPT_TERM_MODEL` | `model` | [`DEFAULT_MODEL`] |
//! | `GPT_TERM_MAX_TOKENS` | `max_tokens` | [`DEFAULT_MAX_TOKENS`] |
//! | `EDITOR` | `editor` | [`DEFAULT_EDITOR`] |
//! | `GPT_TERM_HOME` | `data_dir` | `~/.gpt-term` |
//! | `GPT_TERM_LOG` | `log_filter` | [`DEFAULT_LOG_FILTER`] |

use std::path::PathBuf;

use thiserror::Error;

pub const API_KEY_VAR: &str = "CLAUDE_API_KEY";
pub const API_URL_VAR: &str = "GPT_TERM_API_URL";
pub const MODEL_VAR: &str = "GPT_TERM_MODEL";
pub const MAX_TOKENS_VAR: &str = "GPT_TERM_MAX_TOKENS";
pub const EDITOR_VAR: &str = "EDITOR";
pub const HOME_VAR: &str = "GPT_TERM_HOME";
pub const LOG_VAR: &str = "GPT_TERM_LOG";

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_EDITOR: &str = "nvim";
pub const DEFAULT_LOG_FILTER: &str = "info";
const DATA_DIR_NAME: &str = ".gpt-term";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("CLAUDE_API_KEY environment variable is not defined")]
    MissingApiKey,

    #[error("could not determine the home directory; set GPT_TERM_HOME")]
    NoHomeDir,
}

/// Application settings.
///
/// # Example
///
/// ```
/// use gpt_term::startup::AppConfig;
///
/// let config = AppConfig::new("sk-test")
///     .with_model("claude-3-5-haiku-latest")
///     .with_editor("vim");
/// assert_eq!(config.max_tokens, 1000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    /// Editor command line; may include arguments (`code --wait`).
    pub editor: String,
    /// Root for snapshots and the log file.
    pub data_dir: PathBuf,
    pub log_filter: String,
}

impl AppConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            editor: DEFAULT_EDITOR.to_string(),
            data_dir: PathBuf::from(DATA_DIR_NAME),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = editor.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn conversations_dir(&self) -> PathBuf {
        self.data_dir.join("conversations")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("gpt-term.log")
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_vars(|key| std::env::var(key).ok(), dirs::home_dir())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_env_vars<F>(lookup: F, home: Option<PathBuf>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;

        let data_dir = match get(HOME_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => home.ok_or(ConfigError::NoHomeDir)?.join(DATA_DIR_NAME),
        };

        let mut config = Self::new(api_key).with_data_dir(data_dir);

        if let Some(url) = get(API_URL_VAR) {
            config = config.with_api_url(url);
        }
        if let Some(model) = get(MODEL_VAR) {
            config = config.with_model(model);
        }
        if let Some(raw) = get(MAX_TOKENS_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => config = config.with_max_tokens(n),
                _ => tracing::warn!(value = %raw, "ignoring invalid {}", MAX_TOKENS_VAR),
            }
        }
        if let Some(editor) = get(EDITOR_VAR) {
            config = config.with_editor(editor);
        }
        if let Some(filter) = get(LOG_VAR) {
            config = config.with_log_filter(filter);
        }

        Ok(config)
    }
}
