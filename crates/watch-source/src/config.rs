use std::time::Duration;

/// Configuration for snapshot refreshes.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub refresh_interval: Duration,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
    pub error_backoff: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(60),
            cache_ttl: Duration::from_secs(30),
            request_timeout: Duration::from_secs(10),
            error_backoff: Duration::from_secs(5),
        }
    }
}
