use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassificationError {
    /// The backend could not produce a label (model failure, remote error).
    #[error("sentiment backend error: {0}")]
    Backend(String),
}
