use std::future::Future;

use crate::error::PlacesError;
use crate::types::{PageRequest, PlaceDetails, SearchPage};

/// The two directory endpoints the pipeline depends on.
///
/// [`crate::PlacesClient`] is the HTTP implementation; tests substitute
/// in-memory fakes so pagination and orchestration can be exercised without
/// a network.
pub trait DirectorySource: Sync {
    /// Fetches a single search page.
    fn search_page(
        &self,
        request: PageRequest<'_>,
    ) -> impl Future<Output = Result<SearchPage, PlacesError>> + Send;

    /// Fetches name and reviews for one place.
    fn place_details(
        &self,
        place_id: &str,
    ) -> impl Future<Output = Result<PlaceDetails, PlacesError>> + Send;
}
