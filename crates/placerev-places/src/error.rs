use serde::Serialize;
use thiserror::Error;

/// Errors returned by the places directory client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure, or a non-2xx status other than 429.
    ///
    /// The request URL (which carries the API key) is stripped before the
    /// error is stored.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429, or `OVER_QUERY_LIMIT` in the response envelope.
    #[error("rate limited by places directory: {0}")]
    RateLimited(String),

    /// The directory answered with an error status in its JSON envelope.
    #[error("places API error {status}: {message}")]
    ApiError { status: String, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

/// The two failure classes callers need to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    RateLimit,
}

impl PlacesError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            PlacesError::RateLimited(_) => FailureKind::RateLimit,
            PlacesError::Http(e) if e.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS) => {
                FailureKind::RateLimit
            }
            PlacesError::Http(_)
            | PlacesError::ApiError { .. }
            | PlacesError::Deserialize { .. }
            | PlacesError::InvalidBaseUrl(_) => FailureKind::Transport,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport"),
            FailureKind::RateLimit => write!(f, "rate_limit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_maps_to_rate_limit_kind() {
        let err = PlacesError::RateLimited("OVER_QUERY_LIMIT".to_owned());
        assert_eq!(err.kind(), FailureKind::RateLimit);
    }

    #[test]
    fn api_error_maps_to_transport_kind() {
        let err = PlacesError::ApiError {
            status: "REQUEST_DENIED".to_owned(),
            message: "bad key".to_owned(),
        };
        assert_eq!(err.kind(), FailureKind::Transport);
    }

    #[test]
    fn deserialize_error_maps_to_transport_kind() {
        let source = serde_json::from_str::<()>("invalid").unwrap_err();
        let err = PlacesError::Deserialize {
            context: "textsearch".to_owned(),
            source,
        };
        assert_eq!(err.kind(), FailureKind::Transport);
    }
}
