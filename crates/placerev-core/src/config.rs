use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load configuration for commands that never contact the directory.
///
/// Same as [`load_app_config`] except that `PLACEREV_PLACES_API_KEY` may be
/// absent, in which case `places_api_key` is empty.
///
/// # Errors
///
/// Returns `ConfigError` if a non-secret value is invalid.
pub fn load_app_config_without_key() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config_inner(|key| std::env::var(key), false)
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    build_app_config_inner(lookup, true)
}

fn build_app_config_inner<F>(lookup: F, require_key: bool) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let places_api_key = if require_key {
        require("PLACEREV_PLACES_API_KEY")?
    } else {
        lookup("PLACEREV_PLACES_API_KEY").unwrap_or_default()
    };
    let places_base_url = or_default("PLACEREV_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);
    let log_level = or_default("PLACEREV_LOG_LEVEL", "info");
    let language = or_default("PLACEREV_LANGUAGE", "es");
    let region = or_default("PLACEREV_REGION", "es");

    let request_timeout_secs = parse_u64("PLACEREV_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("PLACEREV_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("PLACEREV_RETRY_BACKOFF_BASE_MS", "1000")?;

    let search_radius_m = parse_u32("PLACEREV_SEARCH_RADIUS_M", "10000")?;
    let max_results = parse_usize("PLACEREV_MAX_RESULTS", "60")?;
    let max_reviews = parse_usize("PLACEREV_MAX_REVIEWS", "10")?;
    let max_concurrent_entities = parse_usize("PLACEREV_MAX_CONCURRENT_ENTITIES", "1")?;

    if max_concurrent_entities == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PLACEREV_MAX_CONCURRENT_ENTITIES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        places_api_key,
        places_base_url,
        log_level,
        language,
        region,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        search_radius_m,
        max_results,
        max_reviews,
        max_concurrent_entities,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
