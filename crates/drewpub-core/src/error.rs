use thiserror::Error;

/// Failures surfaced by the narrator controller and runtime handle.
#[derive(Debug, Error)]
pub enum NarrationError {
    #[error("No text found in current chapter.")]
    NoText,
    #[error("No readable text found.")]
    NoReadableText,
    #[error("narrator runtime is no longer running")]
    RuntimeClosed,
    #[error("failed to spawn narrator thread: {0}")]
    Spawn(#[from] std::io::Error),
}
