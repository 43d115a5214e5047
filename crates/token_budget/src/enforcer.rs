//! Transcript budget enforcement.
//!
//! Evicts the oldest conversation turns until the transcript's token total
//! fits the ceiling, or only the system message and one survivor remain.

use chat_core::Transcript;

use crate::counter::{transcript_tokens, TokenCounter, TranscriptTokens};

/// Fewest messages enforcement will leave in place: the system message plus
/// one conversation turn.
pub const MIN_MESSAGES: usize = 2;

/// Report of one enforcement pass.
#[derive(Debug, Clone)]
pub struct BudgetOutcome {
    /// Token total after enforcement.
    pub total: TranscriptTokens,
    /// Number of messages evicted by this pass.
    pub evicted: usize,
    /// True when enforcement stopped at the two-message floor while the
    /// transcript was still over budget.
    pub at_floor: bool,
}

/// Trim `transcript` until its token total is at or under `budget`.
///
/// Eviction is strictly oldest-first among non-system messages and removes
/// whole messages only; the total is recounted from scratch after every
/// eviction. The transcript is never reduced below [`MIN_MESSAGES`], even
/// when the survivors alone exceed the budget.
///
/// A degraded count (see [`TranscriptTokens`]) contributes a zero total, so
/// no eviction happens while counting is failing and the transcript may
/// run over budget until counting recovers.
pub fn enforce_budget(
    counter: &dyn TokenCounter,
    transcript: &mut Transcript,
    budget: usize,
) -> BudgetOutcome {
    let mut evicted = 0;
    let mut total = transcript_tokens(counter, transcript.messages());

    while total.budgeted_total() > budget && transcript.len() > MIN_MESSAGES {
        let Some(removed) = transcript.evict_oldest_turn() else {
            break;
        };
        log::debug!(
            "evicted oldest {} message to fit the token budget",
            removed.role.as_str()
        );
        evicted += 1;
        total = transcript_tokens(counter, transcript.messages());
    }

    let at_floor = total.budgeted_total() > budget && transcript.len() <= MIN_MESSAGES;
    if at_floor {
        log::warn!(
            "transcript still over the {}-token budget at minimum size",
            budget
        );
    }

    BudgetOutcome {
        total,
        evicted,
        at_floor,
    }
}
