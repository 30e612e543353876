use std::{env, str::FromStr, time::Duration};

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Middleware knobs read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub rate_limit_enabled: bool,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst_size: u32,
    pub rate_limit_cleanup_interval: Duration,
    pub request_timeout: Duration,
    pub cors_allowed_origins: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            rate_limit_enabled: true,
            rate_limit_per_second: 2,
            rate_limit_burst_size: 5,
            rate_limit_cleanup_interval: Duration::from_secs(60),
            request_timeout: Duration::from_secs(30),
            cors_allowed_origins: None,
        }
    }
}

fn env_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unset or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            rate_limit_enabled: env_or(&lookup, "RATE_LIMIT_ENABLED", defaults.rate_limit_enabled),
            rate_limit_per_second: env_or(
                &lookup,
                "RATE_LIMIT_PER_SECOND",
                defaults.rate_limit_per_second,
            ),
            rate_limit_burst_size: env_or(
                &lookup,
                "RATE_LIMIT_BURST_SIZE",
                defaults.rate_limit_burst_size,
            ),
            rate_limit_cleanup_interval: Duration::from_secs(env_or(
                &lookup,
                "RATE_LIMIT_CLEANUP_INTERVAL_SECS",
                defaults.rate_limit_cleanup_interval.as_secs(),
            )),
            request_timeout: Duration::from_secs(env_or(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS"),
        }
    }

    /// Restricted CORS when origins are configured, permissive otherwise.
    pub fn cors_layer(&self) -> CorsLayer {
        let Some(origins) = self.cors_allowed_origins.as_deref() else {
            tracing::info!("CORS_ALLOWED_ORIGINS not set; using permissive CORS configuration");
            return CorsLayer::permissive();
        };

        let allowed_origins = parse_origins(origins);
        if allowed_origins.is_empty() {
            tracing::warn!(
                "CORS_ALLOWED_ORIGINS was set but no valid origins were parsed; falling back to permissive CORS"
            );
            return CorsLayer::permissive();
        }

        tracing::info!(allowed = %origins, "Configured restricted CORS origins");
        CorsLayer::new()
            .allow_headers(AllowHeaders::mirror_request())
            .allow_methods(AllowMethods::list([
                Method::GET,
                Method::POST,
                Method::OPTIONS,
            ]))
            .allow_origin(AllowOrigin::list(allowed_origins))
    }
}

fn parse_origins(origins: &str) -> Vec<HeaderValue> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(origin, error = %err, "Invalid CORS origin, skipping");
                None
            }
        })
        .collect()
}
