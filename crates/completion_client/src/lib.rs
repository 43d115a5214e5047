//! completion_client - non-streaming chat-completions client
//!
//! One call sends an ordered transcript to an OpenAI-compatible
//! `/chat/completions` endpoint and returns the first choice's message
//! text. No streaming, no retries: a failed call surfaces a typed error
//! and the caller decides what to do with it.

pub mod client;
pub mod client_trait;
pub mod error;
pub mod models;

pub use client::{ChatClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use client_trait::CompletionBackend;
pub use error::CompletionError;
pub use models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
