use placerev_places::{FailureKind, PlacesError};
use thiserror::Error;

/// Errors that fail a whole collection run.
///
/// Only the first search page can fail a run; every later failure is
/// recorded in [`crate::RunDiagnostics`] and skipped.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("directory search failed: {0}")]
    Search(#[from] PlacesError),
}

impl PipelineError {
    /// Whether the run failed on transport or on a rate-limit signal.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            PipelineError::Search(e) => e.kind(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
