//! Places directory request and response types.
//!
//! The wire types model the JSON returned by the `textsearch` and `details`
//! endpoints. Both wrap their payload in an envelope with a `status` string
//! (`"OK"`, `"ZERO_RESULTS"`, `"OVER_QUERY_LIMIT"`, ...) and an optional
//! `error_message`.

use chrono::{DateTime, Utc};
use placerev_core::{Entity, Location, RawReview};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parameters for one directory search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    /// Bias results around this point. `radius_m` is only sent alongside it.
    pub location: Option<Location>,
    pub radius_m: u32,
    /// Upper bound on returned entities; the result is truncated to it.
    pub max_results: usize,
}

/// A single page request: either the initial query or a bare continuation.
#[derive(Debug, Clone, Copy)]
pub enum PageRequest<'a> {
    First(&'a SearchQuery),
    Continuation(&'a str),
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub entities: Vec<Entity>,
    pub next_page_token: Option<String>,
}

/// Entity detail restricted to display name and reviews.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceDetails {
    pub name: String,
    pub reviews: Vec<RawReview>,
}

// ---------------------------------------------------------------------------
// textsearch
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct TextSearchResponse {
    #[serde(default)]
    pub results: Vec<PlaceSummary>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaceSummary {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub place_id: Option<String>,
}

impl From<TextSearchResponse> for SearchPage {
    fn from(resp: TextSearchResponse) -> Self {
        let entities = resp
            .results
            .into_iter()
            .map(|p| Entity {
                name: p.name.unwrap_or_default(),
                external_id: p.place_id.filter(|id| !id.trim().is_empty()),
            })
            .collect();
        let next_page_token = resp.next_page_token.filter(|t| !t.is_empty());
        Self {
            entities,
            next_page_token,
        }
    }
}

// ---------------------------------------------------------------------------
// details
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    #[serde(default)]
    pub result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_reviews")]
    pub reviews: Vec<WireReview>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireReview {
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    /// Whole stars, sometimes sent as `4.0` or `"4"`.
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    /// Seconds since the Unix epoch; fractional seconds are truncated.
    #[serde(default, deserialize_with = "lenient_number")]
    pub time: Option<f64>,
}

/// Accepts a string; any other JSON type reads as absent.
fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(de)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Accepts a finite number or a numeric string; anything else reads as absent.
fn lenient_number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    let number = match Option::<Value>::deserialize(de)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}

/// Keeps every review entry; entries that do not parse as a review become
/// all-default reviews.
fn lenient_reviews<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<WireReview>, D::Error> {
    let entries = Option::<Vec<Value>>::deserialize(de)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap_or_default())
        .collect())
}

impl WireReview {
    pub(crate) fn into_raw(self, entity_name: &str) -> RawReview {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rating = self
            .rating
            .map_or(0, |r| r.round().clamp(0.0, 5.0) as u8);
        #[allow(clippy::cast_possible_truncation)]
        let timestamp = self
            .time
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs.trunc() as i64, 0))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        RawReview {
            text: self.text.unwrap_or_default(),
            rating,
            timestamp,
            entity_name: entity_name.to_owned(),
        }
    }
}

impl From<DetailsResponse> for PlaceDetails {
    fn from(resp: DetailsResponse) -> Self {
        let Some(result) = resp.result else {
            return Self::default();
        };
        let name = result.name.unwrap_or_default();
        let reviews = result
            .reviews
            .into_iter()
            .map(|r| r.into_raw(&name))
            .collect();
        Self { name, reviews }
    }
}
