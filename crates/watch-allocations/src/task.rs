use std::sync::Arc;

use pragma_common::services::{Service, ServiceRunner};
use tokio::sync::watch;
use watch_metrics::AllocationMetrics;
use watch_types::ChainData;

use crate::{service::AllocationsService, summary::ProtocolsByChain};

pub struct AggregationTask {
    snapshots: watch::Receiver<Arc<Vec<ChainData>>>,
    publisher: watch::Sender<Arc<ProtocolsByChain>>,
    metrics: Arc<AllocationMetrics>,
}

impl AggregationTask {
    pub const fn new(
        snapshots: watch::Receiver<Arc<Vec<ChainData>>>,
        publisher: watch::Sender<Arc<ProtocolsByChain>>,
        metrics: Arc<AllocationMetrics>,
    ) -> Self {
        Self {
            snapshots,
            publisher,
            metrics,
        }
    }
}

#[async_trait::async_trait]
impl Service for AggregationTask {
    async fn start<'a>(&mut self, mut runner: ServiceRunner<'a>) -> anyhow::Result<()> {
        let snapshots = self.snapshots.clone();
        let publisher = self.publisher.clone();
        let metrics = Arc::clone(&self.metrics);

        runner.spawn_loop(move |ctx| async move {
            let service = AllocationsService::new(snapshots, publisher, metrics);

            if let Some(result) = ctx.run_until_cancelled(service.run_forever()).await {
                result?;
            }

            anyhow::Ok(())
        });

        Ok(())
    }
}
