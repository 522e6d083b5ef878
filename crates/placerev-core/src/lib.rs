//! Shared domain types and configuration for placerev.
//!
//! Everything that more than one crate needs to agree on lives here: the
//! review record types that flow through the pipeline, the optional search
//! location, and the environment-driven [`AppConfig`].

pub mod app_config;
pub mod config;
pub mod reviews;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, load_app_config_without_key};
pub use reviews::{ClassifiedReview, Entity, Location, RawReview, Sentiment};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
