use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An organization discovered through directory search.
///
/// `external_id` is the directory's opaque place identifier. Search results
/// without one are kept as `None` so the orchestrator can drop (and count)
/// them before any review fetch is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub external_id: Option<String>,
}

/// One review as returned by the directory's detail endpoint.
///
/// Absent upstream fields are defaulted at parse time: empty text, rating
/// `0`, and the Unix epoch as timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReview {
    pub text: String,
    /// Star rating, `1..=5` when present upstream, `0` when absent.
    pub rating: u8,
    pub timestamp: DateTime<Utc>,
    /// Display name of the reviewed entity, denormalized for grouping.
    pub entity_name: String,
}

/// Coarse three-way sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A [`RawReview`] with its sentiment classification attached.
///
/// There is no way to build one without a label: reviews that fail
/// classification never become a `ClassifiedReview`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedReview {
    #[serde(flatten)]
    pub review: RawReview,
    pub sentiment: Sentiment,
    /// Classifier confidence in `[0.0, 1.0]`.
    pub confidence: f32,
}

impl ClassifiedReview {
    /// Attaches a classification to a raw review, clamping `confidence`
    /// into `[0.0, 1.0]`.
    #[must_use]
    pub fn new(review: RawReview, sentiment: Sentiment, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            review,
            sentiment,
            confidence,
        }
    }

    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.review.entity_name
    }

    #[must_use]
    pub fn rating(&self) -> u8 {
        self.review.rating
    }
}

/// Latitude/longitude pair used to bias directory search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for Location {
    type Err = String;

    /// Parses `"lat,lng"`, e.g. `"40.4168,-3.7038"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lat,lng\", got \"{s}\""))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|e| format!("invalid latitude \"{}\": {e}", lat.trim()))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|e| format!("invalid longitude \"{}\": {e}", lng.trim()))?;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!("latitude {lat} out of range"));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!("longitude {lng} out of range"));
        }
        Ok(Self { lat, lng })
    }
}
