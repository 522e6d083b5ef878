//! Review collection pipeline for placerev.
//!
//! [`Pipeline::run`] searches the places directory, fetches reviews for each
//! discovered entity, classifies them and aggregates the result. Failures
//! after the first search page are recorded as [`Skipped`] units instead of
//! failing the run.

pub mod aggregate;
pub mod cancel;
pub mod error;
pub mod export;
pub mod orchestrator;
pub mod outcome;

pub use aggregate::{aggregate, AggregateReport, MostPositive, SentimentCounts, TopRated};
pub use cancel::{cancel_pair, CancelHandle, CancelSignal};
pub use error::{ExportError, PipelineError};
pub use export::{to_csv_string, write_csv, write_csv_file, CSV_HEADER};
pub use orchestrator::{Pipeline, PipelineSettings};
pub use outcome::{Accumulator, RunDiagnostics, RunOutcome, Skipped};
