//! Run results and the skip-and-continue accumulator.

use placerev_core::ClassifiedReview;
use placerev_places::FailureKind;
use serde::Serialize;

use crate::aggregate::AggregateReport;

/// One unit of work that was skipped without failing the run.
///
/// `rank` is the entity's position in search order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum Skipped {
    /// A continuation page failed; pagination stopped there.
    SearchPage {
        page: usize,
        kind: FailureKind,
        error: String,
    },
    /// The search result had no directory id, so reviews cannot be fetched.
    MissingExternalId { rank: usize, entity: String },
    /// The detail request for one entity failed.
    Fetch {
        rank: usize,
        entity: String,
        kind: FailureKind,
        error: String,
    },
    /// One review could not be classified and was dropped.
    Classification {
        rank: usize,
        entity: String,
        review: usize,
        error: String,
    },
}

/// Classified records plus everything skipped along the way.
///
/// The orchestrator owns one of these per run and merges per-entity
/// batches into it in discovery order.
#[derive(Debug, Default)]
pub struct Accumulator {
    records: Vec<ClassifiedReview>,
    skipped: Vec<Skipped>,
}

impl Accumulator {
    pub fn push(&mut self, record: ClassifiedReview) {
        self.records.push(record);
    }

    pub fn skip(&mut self, skipped: Skipped) {
        self.skipped.push(skipped);
    }

    /// Appends another accumulator's records and skips after this one's.
    pub fn merge(&mut self, other: Accumulator) {
        self.records.extend(other.records);
        self.skipped.extend(other.skipped);
    }

    #[must_use]
    pub fn records(&self) -> &[ClassifiedReview] {
        &self.records
    }

    #[must_use]
    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<ClassifiedReview>, Vec<Skipped>) {
        (self.records, self.skipped)
    }
}

/// What happened during a run, independent of whether it produced data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunDiagnostics {
    /// Entities returned by search (after truncation to `max_results`).
    pub entities_discovered: usize,
    /// Entities whose reviews were fetched successfully.
    pub entities_fetched: usize,
    pub search_pages: usize,
    pub reviews_fetched: usize,
    pub skipped: Vec<Skipped>,
    pub cancelled: bool,
}

impl RunDiagnostics {
    /// Entities skipped for a missing id or a failed fetch.
    #[must_use]
    pub fn skipped_entities(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s, Skipped::MissingExternalId { .. } | Skipped::Fetch { .. }))
            .count()
    }

    /// Reviews dropped because classification failed.
    #[must_use]
    pub fn skipped_reviews(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s, Skipped::Classification { .. }))
            .count()
    }

    /// `true` if a continuation page failed and search results may be incomplete.
    #[must_use]
    pub fn search_truncated(&self) -> bool {
        self.skipped
            .iter()
            .any(|s| matches!(s, Skipped::SearchPage { .. }))
    }
}

/// Successful terminal state of a run.
///
/// A failed run is the `Err` side of [`crate::Pipeline::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// At least one review was collected and classified.
    Collected {
        records: Vec<ClassifiedReview>,
        report: AggregateReport,
        diagnostics: RunDiagnostics,
    },
    /// The run completed but produced no usable records.
    NoData { diagnostics: RunDiagnostics },
}

impl RunOutcome {
    #[must_use]
    pub fn diagnostics(&self) -> &RunDiagnostics {
        match self {
            RunOutcome::Collected { diagnostics, .. } | RunOutcome::NoData { diagnostics } => {
                diagnostics
            }
        }
    }

    /// Classified records; empty for [`RunOutcome::NoData`].
    #[must_use]
    pub fn records(&self) -> &[ClassifiedReview] {
        match self {
            RunOutcome::Collected { records, .. } => records,
            RunOutcome::NoData { .. } => &[],
        }
    }

    #[must_use]
    pub fn report(&self) -> Option<&AggregateReport> {
        match self {
            RunOutcome::Collected { report, .. } => Some(report),
            RunOutcome::NoData { .. } => None,
        }
    }

    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, RunOutcome::NoData { .. })
    }
}
