pub mod error;
pub mod event;
pub mod export;
pub mod script;
pub mod transcript;

pub use error::ConciergeError;
pub use event::{FeedUpdate, SessionUpdate};
pub use export::{session_slug, transcript_to_json, TranscriptExporter};
pub use script::DialogueScript;
pub use transcript::{Speaker, TranscriptEntry};
