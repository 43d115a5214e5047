//! chat_session - per-session conversation state and the request cycle
//!
//! A [`ChatSession`] owns one transcript and its collaborators: a token
//! counter, a budget ceiling, and a completion backend. Each call to
//! [`ChatSession::send`] runs one full turn:
//!
//! 1. reject blank input
//! 2. append the user message
//! 3. evict oldest turns until the transcript fits the token budget
//! 4. send the whole trimmed transcript to the backend
//! 5. append and return the assistant reply
//!
//! Sessions are plain values. One logical actor drives a session at a
//! time; mutating operations take `&mut self` and there is no locking.
//! Independent sessions never share transcript state.

pub mod error;
pub mod session;

pub use error::SessionError;
pub use session::{ChatSession, SessionBuilder, DEFAULT_TOKEN_BUDGET};
