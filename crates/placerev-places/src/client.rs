//! HTTP client for the places directory REST API.
//!
//! Wraps `reqwest` with API key handling, locale parameters, retry on
//! transient failures, and typed response deserialization. Every response
//! envelope is checked for its `"status"` field: quota signals surface as
//! [`PlacesError::RateLimited`], other non-OK statuses as
//! [`PlacesError::ApiError`].

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::PlacesError;
use crate::retry::retry_with_backoff;
use crate::source::DirectorySource;
use crate::types::{DetailsResponse, PageRequest, PlaceDetails, SearchPage, TextSearchResponse};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Field mask for the details endpoint: only what review collection needs.
const DETAIL_FIELDS: &str = "review,name,rating";

/// Client for the places directory.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests. The API key is appended to every
/// request URL and is never included in logs or errors.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    language: String,
    region: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PlacesClient {
    /// Creates a new client pointed at the production directory.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// Defaults to Spanish locale (`language=es`, `region=es`) and no retries;
    /// see [`Self::with_locale`] and [`Self::with_retry`].
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("placerev/0.1 (review-collection)")
            .build()?;

        // Ensure exactly one trailing slash so `Url::join` appends endpoint
        // paths instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalised).map_err(|_| PlacesError::InvalidBaseUrl(base_url.to_owned()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            language: "es".to_owned(),
            region: "es".to_owned(),
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Builds a client from application config: base URL, timeout, locale,
    /// and retry policy.
    ///
    /// # Errors
    ///
    /// See [`Self::with_base_url`].
    pub fn from_app_config(config: &placerev_core::AppConfig) -> Result<Self, PlacesError> {
        Ok(Self::with_base_url(
            &config.places_api_key,
            config.request_timeout_secs,
            &config.places_base_url,
        )?
        .with_locale(&config.language, &config.region)
        .with_retry(config.max_retries, config.retry_backoff_base_ms))
    }

    #[must_use]
    pub fn with_locale(mut self, language: &str, region: &str) -> Self {
        language.clone_into(&mut self.language);
        region.clone_into(&mut self.region);
        self
    }

    /// Sets the retry policy for transient failures. `max_retries = 0`
    /// disables retries.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Builds the `textsearch` URL for a page request.
    ///
    /// A continuation carries only the page token (plus the key); query,
    /// locale and location bias belong to the first request.
    fn search_url(&self, request: PageRequest<'_>) -> Result<Url, PlacesError> {
        match request {
            PageRequest::First(query) => {
                let location = query.location.map(|l| l.to_string());
                let radius = query.radius_m.to_string();
                let mut params = vec![
                    ("query", query.text.as_str()),
                    ("language", self.language.as_str()),
                    ("region", self.region.as_str()),
                ];
                if let Some(location) = location.as_deref() {
                    params.push(("location", location));
                    params.push(("radius", radius.as_str()));
                }
                self.build_url("textsearch/json", &params)
            }
            PageRequest::Continuation(token) => {
                self.build_url("textsearch/json", &[("pagetoken", token)])
            }
        }
    }

    fn details_url(&self, place_id: &str) -> Result<Url, PlacesError> {
        self.build_url(
            "details/json",
            &[
                ("place_id", place_id),
                ("fields", DETAIL_FIELDS),
                ("language", self.language.as_str()),
            ],
        )
    }

    /// Builds the full request URL with percent-encoded query parameters.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|_| PlacesError::InvalidBaseUrl(self.base_url.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request with retry and returns the checked JSON envelope.
    ///
    /// `context` names the endpoint for error messages; the URL itself is
    /// never surfaced because it carries the API key.
    async fn request_json(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<serde_json::Value, PlacesError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| PlacesError::Http(e.without_url()))?;

                if response.status() == StatusCode::TOO_MANY_REQUESTS {
                    return Err(PlacesError::RateLimited(format!("HTTP 429 from {context}")));
                }

                let response = response
                    .error_for_status()
                    .map_err(|e| PlacesError::Http(e.without_url()))?;
                let body = response
                    .text()
                    .await
                    .map_err(|e| PlacesError::Http(e.without_url()))?;
                let value: serde_json::Value =
                    serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                        context: context.to_owned(),
                        source: e,
                    })?;
                Self::check_api_status(&value)?;
                Ok(value)
            }
        })
        .await
    }

    /// Checks the envelope's `"status"` field.
    ///
    /// `OK` and `ZERO_RESULTS` pass. A missing status is accepted.
    fn check_api_status(body: &serde_json::Value) -> Result<(), PlacesError> {
        let Some(status) = body.get("status").and_then(serde_json::Value::as_str) else {
            return Ok(());
        };
        let message = body
            .get("error_message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or(status)
            .to_owned();
        match status {
            "OK" | "ZERO_RESULTS" => Ok(()),
            "OVER_QUERY_LIMIT" | "RESOURCE_EXHAUSTED" => Err(PlacesError::RateLimited(message)),
            other => Err(PlacesError::ApiError {
                status: other.to_owned(),
                message,
            }),
        }
    }
}

impl DirectorySource for PlacesClient {
    /// Fetches one `textsearch` page.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::RateLimited`] on HTTP 429 or a quota status.
    /// - [`PlacesError::ApiError`] on any other non-OK status.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected shape.
    async fn search_page(&self, request: PageRequest<'_>) -> Result<SearchPage, PlacesError> {
        let url = self.search_url(request)?;
        let body = self.request_json(&url, "textsearch").await?;
        let parsed: TextSearchResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: "textsearch".to_owned(),
                source: e,
            })?;
        Ok(parsed.into())
    }

    /// Fetches name and reviews for one place via the `details` endpoint.
    ///
    /// # Errors
    ///
    /// Same as [`Self::search_page`].
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = self.details_url(place_id)?;
        let body = self.request_json(&url, "details").await?;
        let parsed: DetailsResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("details(place_id={place_id})"),
                source: e,
            })?;
        Ok(parsed.into())
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
