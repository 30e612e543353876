mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use pragma_common::{
    services::{Service, ServiceGroup},
    telemetry::init_telemetry,
};
use tokio::sync::watch;

use crate::cli::WatchCli;
use watch_allocations::{AggregationTask, ProtocolsByChain};
use watch_api::{ApiConfig, ApiService, AppState};
use watch_metrics::MetricsRegistry;
use watch_source::{SnapshotLocation, SourceTask, build_source};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = WatchCli::parse();
    let source_config = cli.source_config();
    let WatchCli {
        otel_collector_endpoint,
        api_port,
        snapshot_url,
        snapshot_path,
        ..
    } = cli;

    let app_name = "allocations_watch";
    if let Err(e) = init_telemetry(app_name, otel_collector_endpoint) {
        panic!("Could not init telemetry: {e}");
    }

    let location = SnapshotLocation::from_options(snapshot_url, snapshot_path)?;
    tracing::info!(?location, "Watching vaults snapshot");
    let source = build_source(location, &source_config)?;

    let metrics = MetricsRegistry::new();
    let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(Vec::new()));
    let (allocations_tx, allocations_rx) = watch::channel(Arc::new(ProtocolsByChain::default()));

    let app_state = AppState {
        allocations: allocations_rx,
    };
    let api_service = ApiService::new(app_state, ApiConfig::from_env(), "0.0.0.0", api_port);

    let source_service = SourceTask::new(
        source,
        snapshot_tx,
        source_config,
        Arc::clone(&metrics.snapshots),
    );

    let aggregation_service =
        AggregationTask::new(snapshot_rx, allocations_tx, Arc::clone(&metrics.allocations));

    ServiceGroup::default()
        .with_critical(api_service)
        .with_critical(source_service)
        .with_critical(aggregation_service)
        .start_and_drive_to_end()
        .await?;

    Ok(())
}
