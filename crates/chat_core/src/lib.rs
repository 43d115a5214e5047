//! chat_core - Core types for the chat session crates
//!
//! This crate provides the foundational types shared by the session stack:
//! - `message`: `Role` and `Message`
//! - `transcript`: the ordered per-session message sequence
//! - `config`: request options, system-prompt presets, API key resolution

pub mod config;
pub mod message;
pub mod transcript;

pub use config::{
    default_secrets_path, resolve_api_key, ConfigError, GenerationOptions, SystemPromptPreset,
    API_KEY_ENV_VAR, API_KEY_SECRET_NAME, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};
pub use message::{Message, Role};
pub use transcript::Transcript;
