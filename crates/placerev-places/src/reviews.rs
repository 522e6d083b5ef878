use placerev_core::RawReview;

use crate::error::PlacesError;
use crate::source::DirectorySource;

/// Fetches up to `max_reviews` reviews for one place.
///
/// The directory already caps how many reviews it returns per place; this
/// applies a further client-side cap. A place without reviews yields an
/// empty `Vec`.
///
/// # Errors
///
/// Propagates any error from [`DirectorySource::place_details`].
pub async fn fetch_reviews<S: DirectorySource>(
    source: &S,
    place_id: &str,
    max_reviews: usize,
) -> Result<Vec<RawReview>, PlacesError> {
    let details = source.place_details(place_id).await?;
    let mut reviews = details.reviews;
    reviews.truncate(max_reviews);
    tracing::debug!(
        place_id,
        name = %details.name,
        count = reviews.len(),
        "fetched place reviews"
    );
    Ok(reviews)
}
