//! Sentiment classification for placerev.
//!
//! The pipeline only depends on the [`SentimentClassifier`] trait, so the
//! backend can be swapped (rule-based, remote service, pretrained model)
//! without touching orchestration or aggregation. [`LexiconClassifier`] is
//! the bundled Spanish/English rule-based backend.

pub mod classifier;
pub mod error;
pub mod lexicon;

pub use classifier::{Classification, SentimentClassifier};
pub use error::ClassificationError;
pub use lexicon::{lexicon_score, LexiconClassifier};
