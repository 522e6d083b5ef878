#[derive(Clone)]
pub struct AppConfig {
    pub places_api_key: String,
    pub places_base_url: String,
    pub log_level: String,
    pub language: String,
    pub region: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub search_radius_m: u32,
    pub max_results: usize,
    pub max_reviews: usize,
    pub max_concurrent_entities: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("places_api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("log_level", &self.log_level)
            .field("language", &self.language)
            .field("region", &self.region)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("search_radius_m", &self.search_radius_m)
            .field("max_results", &self.max_results)
            .field("max_reviews", &self.max_reviews)
            .field("max_concurrent_entities", &self.max_concurrent_entities)
            .finish()
    }
}
