//! Token counting for budget decisions.

use std::sync::Arc;

use chat_core::Message;
use thiserror::Error;
use tiktoken_rs::CoreBPE;

/// Error raised by a failing [`TokenCounter`] implementation.
///
/// The tiktoken-backed counter never returns this after construction; the
/// type exists so alternative counters (and test fakes) can fail and the
/// degraded counting path stays observable.
#[derive(Debug, Clone, Error)]
#[error("token counting failed: {reason}")]
pub struct TokenCountError {
    reason: String,
}

impl TokenCountError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Counts model tokens for budget decisions.
pub trait TokenCounter: Send + Sync {
    /// Count tokens in a plain text string.
    fn count_text(&self, text: &str) -> Result<usize, TokenCountError>;

    /// Count tokens in a single message.
    ///
    /// Only the content is counted; ids and timestamps are local
    /// bookkeeping and never reach the wire.
    fn count_message(&self, message: &Message) -> Result<usize, TokenCountError> {
        self.count_text(&message.content)
    }
}

/// Shared, thread-safe token counter handle.
pub type SharedTokenCounter = Arc<dyn TokenCounter>;

/// Token counter backed by the tiktoken BPE tables.
pub struct TiktokenCounter {
    bpe: Option<CoreBPE>,
}

impl TiktokenCounter {
    /// Resolve the encoding registered for `model`.
    ///
    /// A model with no registered encoding falls back to `cl100k_base`; if
    /// even that table cannot load, counts degrade to a chars/4 estimate.
    /// Construction never fails, and each fallback logs one warning.
    pub fn for_model(model: &str) -> Self {
        let bpe = match tiktoken_rs::get_bpe_from_model(model) {
            Ok(bpe) => Some(bpe),
            Err(err) => {
                log::warn!(
                    "tokenizer for model '{}' not found, falling back to cl100k_base: {}",
                    model,
                    err
                );
                match tiktoken_rs::cl100k_base() {
                    Ok(bpe) => Some(bpe),
                    Err(err) => {
                        log::warn!("cl100k_base unavailable, estimating tokens as chars/4: {}", err);
                        None
                    }
                }
            }
        };
        Self { bpe }
    }
}

impl std::fmt::Debug for TiktokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenCounter")
            .field("bpe_loaded", &self.bpe.is_some())
            .finish()
    }
}

impl TokenCounter for TiktokenCounter {
    fn count_text(&self, text: &str) -> Result<usize, TokenCountError> {
        match &self.bpe {
            Some(bpe) => Ok(bpe.encode_ordinary(text).len()),
            None => Ok(text.len().div_ceil(4)),
        }
    }
}

/// Outcome of counting a whole message sequence.
///
/// Counting is all-or-nothing: one failing message degrades the entire
/// batch. The degraded arm keeps the error, so callers and tests can tell
/// "counted zero tokens" apart from "could not count".
#[derive(Debug, Clone)]
pub enum TranscriptTokens {
    /// Every message counted.
    Exact(usize),
    /// At least one message failed to count.
    Degraded(TokenCountError),
}

impl TranscriptTokens {
    /// Total used for budget decisions.
    ///
    /// A degraded count contributes 0, which means enforcement will not
    /// trim while counting is failing. Availability over budget accuracy.
    pub fn budgeted_total(&self) -> usize {
        match self {
            Self::Exact(total) => *total,
            Self::Degraded(_) => 0,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

/// Sum the token counts of `messages`.
///
/// A failure on any message degrades the whole batch and logs one
/// diagnostic line; the failure never propagates to the caller.
pub fn transcript_tokens(counter: &dyn TokenCounter, messages: &[Message]) -> TranscriptTokens {
    let mut total = 0usize;
    for message in messages {
        match counter.count_message(message) {
            Ok(count) => total += count,
            Err(err) => {
                log::warn!("token count error: {}", err);
                return TranscriptTokens::Degraded(err);
            }
        }
    }
    TranscriptTokens::Exact(total)
}
