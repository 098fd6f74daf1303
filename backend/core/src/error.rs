use thiserror::Error;

/// Top-level error type for the Concierge engines.
///
/// Invalid submissions and post-terminal input are not errors; they are
/// reported as rejection outcomes on the session API so the UI can stay
/// forgiving. Errors here are reserved for genuine failures at the seams
/// (preset lookup, export I/O).
#[derive(Debug, Error)]
pub enum ConciergeError {
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("transcript export failed: {0}")]
    ExportFailed(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
