use thiserror::Error;

/// Failures surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Startup problems: missing API key, out-of-range options.
    #[error("configuration error: {0}")]
    Config(#[from] chat_core::ConfigError),

    /// The completion call failed; surfaced untouched, never retried.
    #[error("completion error: {0}")]
    Completion(#[from] completion_client::CompletionError),

    /// Blank input, rejected before the transcript is touched.
    #[error("user message is empty")]
    EmptyUserMessage,
}
