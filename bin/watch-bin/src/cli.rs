use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;
use watch_source::SourceConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct WatchCli {
    /// OTEL collector endpoint
    #[arg(long, env = "OTEL_COLLECTOR_ENDPOINT")]
    pub otel_collector_endpoint: Option<String>,

    /// API port
    #[arg(long, env = "API_PORT", default_value = "8080")]
    pub api_port: u16,

    /// HTTP endpoint serving the vaults snapshot
    #[arg(long, env = "SNAPSHOT_URL", conflicts_with = "snapshot_path")]
    pub snapshot_url: Option<Url>,

    /// Local JSON file holding the vaults snapshot
    #[arg(long, env = "SNAPSHOT_PATH")]
    pub snapshot_path: Option<PathBuf>,

    /// Seconds between two snapshot refreshes
    #[arg(long, env = "REFRESH_INTERVAL_SECS", default_value = "60")]
    pub refresh_interval_secs: u64,

    /// Seconds an HTTP snapshot stays cached
    #[arg(long, env = "CACHE_TTL_SECS", default_value = "30")]
    pub cache_ttl_secs: u64,
}

impl WatchCli {
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            refresh_interval: Duration::from_secs(self.refresh_interval_secs),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            ..SourceConfig::default()
        }
    }
}
