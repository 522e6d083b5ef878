//! Page-token continuation for directory search.
//!
//! The directory hands back a `next_page_token` with each page that has
//! more results. A token only becomes valid a short while after it was
//! issued: requests made earlier fail with `INVALID_REQUEST` or return the
//! previous page again. [`search_entities`] therefore waits
//! [`CONTINUATION_DELAY`] before every continuation request. The wait goes
//! through a [`Clock`] so tests can observe it without sleeping.

use std::future::Future;
use std::time::Duration;

use placerev_core::Entity;
use tokio::sync::watch;

use crate::error::PlacesError;
use crate::source::DirectorySource;
use crate::types::{PageRequest, SearchQuery};

/// Minimum wait between receiving a page token and using it.
pub const CONTINUATION_DELAY: Duration = Duration::from_secs(2);

/// Hard stop on continuation requests. Prevents infinite loops on cycling
/// tokens; the directory itself serves at most three pages.
const MAX_PAGES: usize = 10;

/// Source of the inter-page wait.
pub trait Clock: Sync {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// [`Clock`] backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Result of a paginated search that got past its first page.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    /// Discovered entities in directory order, truncated to `max_results`.
    pub entities: Vec<Entity>,
    /// Number of pages successfully fetched.
    pub pages: usize,
    /// Error that cut pagination short after the first page, if any.
    pub page_error: Option<PlacesError>,
    /// `true` if cancellation was observed before pagination finished.
    pub cancelled: bool,
}

/// Runs a directory search, following continuation tokens.
///
/// Stops when `max_results` entities are collected, when a page carries no
/// token, when cancellation is signalled, or when a continuation request
/// fails. A failed continuation keeps the entities already collected and is
/// reported in [`SearchOutcome::page_error`].
///
/// # Errors
///
/// Returns the first page's error if the initial request fails.
pub async fn search_entities<S, C>(
    source: &S,
    clock: &C,
    query: &SearchQuery,
    cancel: &watch::Receiver<bool>,
) -> Result<SearchOutcome, PlacesError>
where
    S: DirectorySource,
    C: Clock,
{
    let first = source.search_page(PageRequest::First(query)).await?;
    let mut outcome = SearchOutcome {
        entities: first.entities,
        pages: 1,
        ..SearchOutcome::default()
    };
    let mut token = first.next_page_token;

    tracing::debug!(
        query = %query.text,
        count = outcome.entities.len(),
        has_next = token.is_some(),
        "fetched first search page"
    );

    while let Some(next) = token.take() {
        if outcome.entities.len() >= query.max_results {
            break;
        }
        if outcome.pages >= MAX_PAGES {
            tracing::warn!(pages = outcome.pages, "search page limit reached");
            break;
        }
        if *cancel.borrow() {
            outcome.cancelled = true;
            break;
        }

        clock.sleep(CONTINUATION_DELAY).await;

        if *cancel.borrow() {
            outcome.cancelled = true;
            break;
        }

        match source.search_page(PageRequest::Continuation(&next)).await {
            Ok(page) => {
                outcome.pages += 1;
                tracing::debug!(
                    page = outcome.pages,
                    count = page.entities.len(),
                    has_next = page.next_page_token.is_some(),
                    "fetched continuation page"
                );
                outcome.entities.extend(page.entities);
                token = page.next_page_token;
            }
            Err(e) => {
                tracing::warn!(
                    page = outcome.pages + 1,
                    error = %e,
                    "continuation page failed, keeping results collected so far"
                );
                outcome.page_error = Some(e);
                break;
            }
        }
    }

    outcome.entities.truncate(query.max_results);
    Ok(outcome)
}

#[cfg(test)]
#[path = "pagination_test.rs"]
mod tests;
