use serde::{Deserialize, Serialize};

/// Updates broadcast by a dialogue session after each transcript mutation.
///
/// The presentation layer subscribes and re-renders on every update; the
/// full transcript is always available through the session's snapshot
/// accessor, so updates carry only what changed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionUpdate {
    /// A user entry was appended.
    UserMessage { text: String },
    /// The canned reply for `step` was appended after its delay.
    AgentReply { step: usize, text: String },
    /// The final scripted reply has been delivered; no further input is
    /// accepted.
    SessionClosed,
}

/// Updates broadcast by a log feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedUpdate {
    /// `lines[index]` became visible.
    LineRevealed { index: usize, text: String },
    /// Every line is now revealed; the ticker has shut down.
    Exhausted,
    /// The feed was stopped before exhaustion.
    Stopped,
}

impl std::fmt::Display for SessionUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionUpdate::UserMessage { text } => write!(f, "user: {}", text),
            SessionUpdate::AgentReply { step, text } => write!(f, "agent[{}]: {}", step, text),
            SessionUpdate::SessionClosed => write!(f, "session closed"),
        }
    }
}
