//! Request configuration and API key resolution.
//!
//! The embedding UI reads its widgets, builds a [`GenerationOptions`] once
//! per request, and passes it into the session by value. Validation happens
//! here at the boundary, so the request layer never re-checks ranges.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sampling temperature used when the caller supplies none.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Output token cap used when the caller supplies none.
pub const DEFAULT_MAX_TOKENS: u32 = 100;
/// Allowed sampling temperature values, matching the UI slider bounds.
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=1.0;
/// Allowed output token caps, matching the UI slider bounds.
pub const MAX_TOKENS_RANGE: RangeInclusive<u32> = 1..=250;

/// Key looked up in the secrets file.
pub const API_KEY_SECRET_NAME: &str = "OPEN_API_KEY";
/// Environment variable consulted when the secrets file has no key.
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sampling temperature outside [`TEMPERATURE_RANGE`].
    #[error("temperature {0} is outside the allowed range 0.0..=1.0")]
    TemperatureOutOfRange(f32),

    /// Output token cap outside [`MAX_TOKENS_RANGE`].
    #[error("max_tokens {0} is outside the allowed range 1..=250")]
    MaxTokensOutOfRange(u32),

    /// Neither the secrets file nor the environment holds a key. Sessions
    /// refuse to start in this state.
    #[error("no OPENAI_API_KEY set in secrets or environment")]
    MissingApiKey,
}

/// Validated sampling parameters for one completion request.
///
/// Construction is the only place ranges are checked; a value of this type
/// is valid by construction and safe to forward to the wire as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    temperature: f32,
    max_tokens: u32,
}

impl GenerationOptions {
    /// Validate and build. Out-of-range values are rejected, never clamped.
    pub fn new(temperature: f32, max_tokens: u32) -> Result<Self, ConfigError> {
        if !TEMPERATURE_RANGE.contains(&temperature) {
            return Err(ConfigError::TemperatureOutOfRange(temperature));
        }
        if !MAX_TOKENS_RANGE.contains(&max_tokens) {
            return Err(ConfigError::MaxTokensOutOfRange(max_tokens));
        }
        Ok(Self {
            temperature,
            max_tokens,
        })
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Selectable system-message presets, mirroring the UI persona selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemPromptPreset {
    /// The default persona.
    ArrogantAssistant,
    /// A plain helpful persona.
    HelpfulAssistant,
    /// Caller-supplied system message text.
    Custom(String),
}

impl SystemPromptPreset {
    /// The system message text this preset stands for.
    pub fn prompt_text(&self) -> &str {
        match self {
            Self::ArrogantAssistant => {
                "You are an angry and arrogant assistant who thinks humans are dumb."
            }
            Self::HelpfulAssistant => "You are a helpful assistant.",
            Self::Custom(text) => text,
        }
    }
}

impl Default for SystemPromptPreset {
    fn default() -> Self {
        Self::ArrogantAssistant
    }
}

/// Directory for files this application owns (`~/.chat_session`).
pub fn chat_session_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(".chat_session")
}

/// Default secrets file location (`~/.chat_session/secrets.toml`).
pub fn default_secrets_path() -> PathBuf {
    chat_session_dir().join("secrets.toml")
}

fn api_key_from_secrets(path: &Path) -> Option<String> {
    if !path.exists() {
        return None;
    }
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            log::warn!("failed to read secrets file {}: {}", path.display(), err);
            return None;
        }
    };
    let table: toml::Table = match content.parse() {
        Ok(table) => table,
        Err(err) => {
            log::warn!("failed to parse secrets file {}: {}", path.display(), err);
            return None;
        }
    };
    table
        .get(API_KEY_SECRET_NAME)
        .and_then(|value| value.as_str())
        .map(str::to_owned)
        .filter(|key| !key.is_empty())
}

fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV_VAR)
        .ok()
        .filter(|key| !key.is_empty())
}

/// Resolve the API key: the secrets file first, then the environment.
///
/// `secrets_path` of `None` means the default location. An unreadable or
/// malformed secrets file logs a warning and falls through to the
/// environment. When both sources come up empty the caller gets
/// [`ConfigError::MissingApiKey`] and is expected to stop before accepting
/// any input.
pub fn resolve_api_key(secrets_path: Option<&Path>) -> Result<String, ConfigError> {
    let path = secrets_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_secrets_path);
    api_key_from_secrets(&path)
        .or_else(api_key_from_env)
        .ok_or(ConfigError::MissingApiKey)
}
