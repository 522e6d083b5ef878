use std::sync::Arc;

use placerev_core::Sentiment;

use crate::error::ClassificationError;

/// A sentiment label with the backend's confidence in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: Sentiment,
    /// Confidence in `[0.0, 1.0]`.
    pub confidence: f32,
}

/// Maps review text to a sentiment label.
///
/// Implementations must return the same result for identical text within a
/// run. A failure only drops the one review being classified.
pub trait SentimentClassifier: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ClassificationError`] if the backend cannot label `text`.
    fn classify(&self, text: &str) -> Result<Classification, ClassificationError>;
}

impl<T: SentimentClassifier + ?Sized> SentimentClassifier for &T {
    fn classify(&self, text: &str) -> Result<Classification, ClassificationError> {
        (**self).classify(text)
    }
}

impl<T: SentimentClassifier + ?Sized> SentimentClassifier for Box<T> {
    fn classify(&self, text: &str) -> Result<Classification, ClassificationError> {
        (**self).classify(text)
    }
}

impl<T: SentimentClassifier + ?Sized> SentimentClassifier for Arc<T> {
    fn classify(&self, text: &str) -> Result<Classification, ClassificationError> {
        (**self).classify(text)
    }
}
