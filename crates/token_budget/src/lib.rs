//! token_budget - token counting and transcript budget enforcement
//!
//! Two pieces work together here:
//! - `counter`: the tokenizer adapter that turns message text into token
//!   counts, with graceful fallbacks for unknown models
//! - `enforcer`: oldest-first eviction until the transcript fits a token
//!   ceiling, never shrinking below the system message plus one turn

pub mod counter;
pub mod enforcer;

pub use counter::{
    transcript_tokens, SharedTokenCounter, TiktokenCounter, TokenCountError, TokenCounter,
    TranscriptTokens,
};
pub use enforcer::{enforce_budget, BudgetOutcome};
