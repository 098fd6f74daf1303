//! Scripted dialogue engine.
//!
//! A linear, one-directional conversation: each accepted user submission
//! advances a step counter, and the canned reply for that step is appended
//! after a fixed delay. The pure state machine lives in [`state`]; the
//! timer-driven wrapper the presentation layer talks to lives in
//! [`session`].

pub mod session;
pub mod state;

pub use session::{DialogueConfig, DialogueSession};
pub use state::{RejectReason, SessionState, SubmitOutcome};
