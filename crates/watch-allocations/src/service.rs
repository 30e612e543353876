use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tokio::sync::watch;
use watch_metrics::AllocationMetrics;
use watch_types::ChainData;

use crate::{aggregate::aggregate, summary::ProtocolsByChain};

/// Recomputes the allocation summaries whenever the upstream snapshot changes.
pub struct AllocationsService {
    snapshots: watch::Receiver<Arc<Vec<ChainData>>>,
    publisher: watch::Sender<Arc<ProtocolsByChain>>,
    metrics: Arc<AllocationMetrics>,
}

impl AllocationsService {
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

    /// Aggregates the current snapshot, then every new one, until the
    /// snapshot publisher goes away.
    pub async fn run_forever(mut self) -> anyhow::Result<()> {
        loop {
            let snapshot = self.snapshots.borrow_and_update().clone();
            self.refresh(&snapshot);

            self.snapshots
                .changed()
                .await
                .context("snapshot publisher dropped")?;
        }
    }

    /// Replaces the published summaries with the aggregation of `snapshot`.
    pub fn refresh(&self, snapshot: &[ChainData]) -> Arc<ProtocolsByChain> {
        let started = Instant::now();
        let protocols = Arc::new(aggregate(snapshot));
        let elapsed = started.elapsed();

        self.publisher.send_replace(Arc::clone(&protocols));
        self.metrics.record_aggregation(snapshot.len(), elapsed);

        tracing::info!(
            chains = snapshot.len(),
            protocols = protocols.all().protocols_count,
            tvl_total = %protocols.all().tvl_total,
            elapsed_ms = elapsed.as_millis() as u64,
            "Published protocol allocations"
        );

        protocols
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rust_decimal::dec;
    use watch_metrics::MetricsRegistry;
    use watch_types::{Strategy, Vault};

    use super::*;

    fn snapshot(total_debt: &str) -> Arc<Vec<ChainData>> {
        Arc::new(vec![ChainData {
            chain_name: "Ethereum".to_string(),
            vaults: vec![Vault {
                decimals: 6,
                price: dec!(1),
                strategies: vec![Strategy {
                    name: "Alpha".to_string(),
                    total_debt: Some(total_debt.to_string()),
                    protocols: Some(vec!["Aave".to_string()]),
                }],
                ..Default::default()
            }],
        }])
    }

    async fn wait_for_tvl(
        summaries: &mut watch::Receiver<Arc<ProtocolsByChain>>,
        expected: rust_decimal::Decimal,
    ) {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if summaries.borrow_and_update().all().tvl_total == expected {
                    return;
                }
                summaries.changed().await.unwrap();
            }
        })
        .await
        .expect("summary was not published in time");
    }

    #[tokio::test]
    async fn test_recomputes_on_every_snapshot() {
        let (snapshot_tx, snapshot_rx) = watch::channel(snapshot("1000000"));
        let (summary_tx, mut summary_rx) =
            watch::channel(Arc::new(ProtocolsByChain::default()));

        let service = AllocationsService::new(
            snapshot_rx,
            summary_tx,
            MetricsRegistry::new().allocations.clone(),
        );
        let handle = tokio::spawn(service.run_forever());

        wait_for_tvl(&mut summary_rx, dec!(1)).await;

        snapshot_tx.send_replace(snapshot("5000000"));
        wait_for_tvl(&mut summary_rx, dec!(5)).await;

        snapshot_tx.send_replace(Arc::new(Vec::new()));
        wait_for_tvl(&mut summary_rx, dec!(0)).await;
        assert_eq!(**summary_rx.borrow(), ProtocolsByChain::default());

        drop(snapshot_tx);
        let result = handle.await.unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_refresh_publishes_atomically() {
        let (_snapshot_tx, snapshot_rx) = watch::channel(Arc::new(Vec::new()));
        let (summary_tx, summary_rx) = watch::channel(Arc::new(ProtocolsByChain::default()));
        let service = AllocationsService::new(
            snapshot_rx,
            summary_tx,
            MetricsRegistry::new().allocations.clone(),
        );

        let published = service.refresh(&snapshot("2000000"));

        assert!(Arc::ptr_eq(&published, &summary_rx.borrow()));
        assert_eq!(published.get("Ethereum").unwrap().list["Aave"].tvl, dec!(2));
    }
}
