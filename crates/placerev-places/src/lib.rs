//! Places directory client for placerev.
//!
//! Text search with page-token continuation, and per-place review lookup
//! restricted to the fields review collection needs.

pub mod client;
pub mod error;
pub mod pagination;
pub mod reviews;
pub mod source;
pub mod types;

mod retry;

pub use client::PlacesClient;
pub use error::{FailureKind, PlacesError};
pub use pagination::{search_entities, Clock, SearchOutcome, TokioClock, CONTINUATION_DELAY};
pub use reviews::fetch_reviews;
pub use source::DirectorySource;
pub use types::{PageRequest, PlaceDetails, SearchPage, SearchQuery};
