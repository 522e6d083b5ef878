//! Drives search, review fetch and classification for one run.

use futures::stream::{self, StreamExt};
use placerev_core::{AppConfig, ClassifiedReview, Entity};
use placerev_places::{fetch_reviews, search_entities, Clock, DirectorySource, SearchQuery};
use placerev_sentiment::SentimentClassifier;

use crate::aggregate::aggregate;
use crate::cancel::CancelSignal;
use crate::error::PipelineError;
use crate::outcome::{Accumulator, RunDiagnostics, RunOutcome, Skipped};

const DEFAULT_MAX_REVIEWS: usize = 10;

/// Per-run limits that are not part of the search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub max_reviews: usize,
    /// Entities fetched and classified at the same time. Clamped to at least 1.
    pub max_concurrent_entities: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_reviews: DEFAULT_MAX_REVIEWS,
            max_concurrent_entities: 1,
        }
    }
}

impl PipelineSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_reviews: config.max_reviews,
            max_concurrent_entities: config.max_concurrent_entities,
        }
    }
}

/// Result of processing one discovered entity.
#[derive(Default)]
struct EntityBatch {
    acc: Accumulator,
    fetched: bool,
    reviews_fetched: usize,
}

/// The collection pipeline: a directory, a pacing clock and a classifier.
pub struct Pipeline<S, C, K> {
    source: S,
    clock: C,
    classifier: K,
    settings: PipelineSettings,
}

impl<S, C, K> Pipeline<S, C, K>
where
    S: DirectorySource,
    C: Clock,
    K: SentimentClassifier,
{
    pub fn new(source: S, clock: C, classifier: K, settings: PipelineSettings) -> Self {
        Self {
            source,
            clock,
            classifier,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> PipelineSettings {
        self.settings
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs search → fetch → classify → aggregate.
    ///
    /// Entities are processed in search order and reviews in fetch order.
    /// With `max_concurrent_entities > 1` several entities are in flight at
    /// once, but their results are still merged in search order.
    ///
    /// Returns [`RunOutcome::NoData`] when nothing could be classified,
    /// including when every fetch failed or the run was cancelled before
    /// producing records.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Search`] if the first search page fails.
    pub async fn run(
        &self,
        query: &SearchQuery,
        cancel: &CancelSignal,
    ) -> Result<RunOutcome, PipelineError> {
        let mut diagnostics = RunDiagnostics::default();

        if cancel.is_cancelled() {
            tracing::info!("run cancelled before search started");
            diagnostics.cancelled = true;
            return Ok(RunOutcome::NoData { diagnostics });
        }

        tracing::info!(
            query = %query.text,
            location = ?query.location.as_ref().map(ToString::to_string),
            max_results = query.max_results,
            "starting review collection"
        );

        let search = search_entities(&self.source, &self.clock, query, cancel.receiver())
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, kind = %e.kind(), "first search page failed");
            })?;

        diagnostics.entities_discovered = search.entities.len();
        diagnostics.search_pages = search.pages;
        diagnostics.cancelled = search.cancelled;

        let mut acc = Accumulator::default();
        if let Some(e) = search.page_error {
            acc.skip(Skipped::SearchPage {
                page: search.pages + 1,
                kind: e.kind(),
                error: e.to_string(),
            });
        }

        let concurrency = self.settings.max_concurrent_entities.max(1);
        let batches: Vec<EntityBatch> = stream::iter(search.entities.iter().enumerate())
            .map(|(rank, entity)| self.process_entity(rank, entity, cancel))
            .buffered(concurrency)
            .collect()
            .await;

        for batch in batches {
            if batch.fetched {
                diagnostics.entities_fetched += 1;
            }
            diagnostics.reviews_fetched += batch.reviews_fetched;
            acc.merge(batch.acc);
        }

        diagnostics.cancelled |= cancel.is_cancelled();

        let (records, skipped) = acc.into_parts();
        diagnostics.skipped = skipped;

        if diagnostics.skipped_entities() > 0 || diagnostics.skipped_reviews() > 0 {
            tracing::warn!(
                skipped_entities = diagnostics.skipped_entities(),
                skipped_reviews = diagnostics.skipped_reviews(),
                "some units were skipped during collection"
            );
        }

        if records.is_empty() {
            tracing::info!(
                entities = diagnostics.entities_discovered,
                cancelled = diagnostics.cancelled,
                "run finished without classified reviews"
            );
            return Ok(RunOutcome::NoData { diagnostics });
        }

        let report = aggregate(&records);
        tracing::info!(
            records = records.len(),
            entities = report.average_rating_by_entity.len(),
            cancelled = diagnostics.cancelled,
            "review collection complete"
        );

        Ok(RunOutcome::Collected {
            records,
            report,
            diagnostics,
        })
    }

    async fn process_entity(
        &self,
        rank: usize,
        entity: &Entity,
        cancel: &CancelSignal,
    ) -> EntityBatch {
        let mut batch = EntityBatch::default();

        let Some(place_id) = entity.external_id.as_deref() else {
            tracing::debug!(rank, entity = %entity.name, "entity has no directory id, skipping");
            batch.acc.skip(Skipped::MissingExternalId {
                rank,
                entity: entity.name.clone(),
            });
            return batch;
        };

        if cancel.is_cancelled() {
            return batch;
        }

        let reviews = match fetch_reviews(&self.source, place_id, self.settings.max_reviews).await {
            Ok(reviews) => reviews,
            Err(e) => {
                tracing::warn!(
                    rank,
                    entity = %entity.name,
                    kind = %e.kind(),
                    error = %e,
                    "review fetch failed, skipping entity"
                );
                batch.acc.skip(Skipped::Fetch {
                    rank,
                    entity: entity.name.clone(),
                    kind: e.kind(),
                    error: e.to_string(),
                });
                return batch;
            }
        };
        batch.fetched = true;
        batch.reviews_fetched = reviews.len();

        for (index, mut review) in reviews.into_iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::debug!(rank, entity = %entity.name, "cancelled between reviews");
                break;
            }
            if review.entity_name.is_empty() {
                review.entity_name.clone_from(&entity.name);
            }
            match self.classifier.classify(&review.text) {
                Ok(c) => batch
                    .acc
                    .push(ClassifiedReview::new(review, c.label, c.confidence)),
                Err(e) => {
                    tracing::warn!(
                        rank,
                        entity = %entity.name,
                        review = index,
                        error = %e,
                        "classification failed, dropping review"
                    );
                    batch.acc.skip(Skipped::Classification {
                        rank,
                        entity: entity.name.clone(),
                        review: index,
                        error: e.to_string(),
                    });
                }
            }
        }

        batch
    }
}
