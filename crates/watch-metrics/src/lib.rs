use std::sync::Arc;
use std::time::Duration;

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};

#[derive(Debug)]
pub struct MetricsRegistry {
    pub snapshots: Arc<SnapshotMetrics>,
    pub allocations: Arc<AllocationMetrics>,
}

impl MetricsRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            snapshots: SnapshotMetrics::new(),
            allocations: AllocationMetrics::new(),
        })
    }
}

#[derive(Debug)]
pub struct SnapshotMetrics {
    refreshes: Counter<u64>,
}

impl SnapshotMetrics {
    fn new() -> Arc<Self> {
        let meter = global::meter("allocations-watch");
        let refreshes = meter
            .u64_counter("snapshot_refreshes_total")
            .with_description("Number of upstream snapshot refreshes, by outcome")
            .with_unit("count")
            .init();

        Arc::new(Self { refreshes })
    }

    pub fn record_refresh(&self, source: &str, outcome: RefreshOutcome) {
        self.refreshes.add(
            1,
            &[
                KeyValue::new("source", source.to_string()),
                KeyValue::new("outcome", outcome.as_str()),
            ],
        );
    }
}

#[derive(Debug)]
pub struct AllocationMetrics {
    runs: Counter<u64>,
    duration: Histogram<f64>,
}

impl AllocationMetrics {
    fn new() -> Arc<Self> {
        let meter = global::meter("allocations-watch");
        let runs = meter
            .u64_counter("allocation_aggregations_total")
            .with_description("Number of protocol allocation aggregations")
            .with_unit("count")
            .init();

        let duration = meter
            .f64_histogram("allocation_aggregation_duration_seconds")
            .with_description("Time spent aggregating a snapshot")
            .with_unit("s")
            .init();

        Arc::new(Self { runs, duration })
    }

    pub fn record_aggregation(&self, chains: usize, elapsed: Duration) {
        let attributes = [KeyValue::new("chains", chains as i64)];
        self.runs.add(1, &attributes);
        self.duration.record(elapsed.as_secs_f64(), &attributes);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated,
    Unchanged,
    Failed,
}

impl RefreshOutcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
            Self::Failed => "failed",
        }
    }
}
