//! Timed log revealer.
//!
//! Reveals a static list of lines one at a time at a fixed cadence,
//! simulating a live process feed, then stops. The pure prefix machine
//! lives in [`state`]; the interval-driven runner in [`runner`].

pub mod runner;
pub mod state;

pub use runner::{FeedConfig, LogFeed};
pub use state::{FeedState, TickOutcome};
