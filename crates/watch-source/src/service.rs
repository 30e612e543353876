use std::sync::Arc;

use tokio::sync::watch;
use watch_metrics::{RefreshOutcome, SnapshotMetrics};
use watch_types::ChainData;

use crate::{config::SourceConfig, error::SourceError, traits::VaultSource};

/// Polls a [`VaultSource`] and publishes the snapshot whenever it changes.
///
/// A failed fetch keeps the last published snapshot in place.
pub struct SnapshotService {
    source: Arc<dyn VaultSource>,
    publisher: watch::Sender<Arc<Vec<ChainData>>>,
    config: SourceConfig,
    metrics: Arc<SnapshotMetrics>,
}

impl SnapshotService {
    pub fn new(
        source: Arc<dyn VaultSource>,
        publisher: watch::Sender<Arc<Vec<ChainData>>>,
        config: SourceConfig,
        metrics: Arc<SnapshotMetrics>,
    ) -> Self {
        Self {
            source,
            publisher,
            config,
            metrics,
        }
    }

    pub async fn run_forever(self) -> anyhow::Result<()> {
        loop {
            let delay = match self.refresh().await {
                Ok(_) => self.config.refresh_interval,
                Err(e) => {
                    tracing::error!(
                        source = self.source.name(),
                        error = %e,
                        "Failed to refresh vault snapshot"
                    );
                    self.config.error_backoff
                }
            };

            tokio::time::sleep(delay).await;
        }
    }

    pub async fn refresh(&self) -> Result<RefreshOutcome, SourceError> {
        let chains = match self.source.fetch_chains().await {
            Ok(chains) => chains,
            Err(e) => {
                self.metrics
                    .record_refresh(self.source.name(), RefreshOutcome::Failed);
                return Err(e);
            }
        };
        let chains_count = chains.len();

        let modified = self.publisher.send_if_modified(|current| {
            if current.as_slice() == chains.as_slice() {
                return false;
            }
            *current = Arc::new(chains);
            true
        });

        let outcome = if modified {
            tracing::info!(
                source = self.source.name(),
                chains = chains_count,
                "Published new vault snapshot"
            );
            RefreshOutcome::Updated
        } else {
            tracing::debug!(source = self.source.name(), "Vault snapshot unchanged");
            RefreshOutcome::Unchanged
        };

        self.metrics.record_refresh(self.source.name(), outcome);
        Ok(outcome)
    }
}
