use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by a completion call.
///
/// None of these are retried here; the embedding UI owns presentation and
/// recovery.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Transport-level failure: connect, TLS, timeout, body read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the endpoint, body kept for diagnostics.
    #[error("API error: HTTP {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body did not parse as the expected JSON shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The endpoint answered without any usable completion text.
    #[error("completion response contained no reply")]
    EmptyCompletion,
}
