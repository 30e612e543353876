use std::sync::Arc;

use pragma_common::services::{Service, ServiceRunner};
use tokio::sync::watch;
use watch_metrics::SnapshotMetrics;
use watch_types::ChainData;

use crate::{config::SourceConfig, service::SnapshotService, traits::VaultSource};

pub struct SourceTask {
    source: Arc<dyn VaultSource>,
    publisher: watch::Sender<Arc<Vec<ChainData>>>,
    config: SourceConfig,
    metrics: Arc<SnapshotMetrics>,
}

impl SourceTask {
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
}

#[async_trait::async_trait]
impl Service for SourceTask {
    async fn start<'a>(&mut self, mut runner: ServiceRunner<'a>) -> anyhow::Result<()> {
        let source = Arc::clone(&self.source);
        let publisher = self.publisher.clone();
        let config = self.config.clone();
        let metrics = Arc::clone(&self.metrics);

        runner.spawn_loop(move |ctx| async move {
            let service = SnapshotService::new(source, publisher, config, metrics);

            if let Some(result) = ctx.run_until_cancelled(service.run_forever()).await {
                result?;
            }

            anyhow::Ok(())
        });

        Ok(())
    }
}
