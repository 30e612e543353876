pub mod config;
pub mod docs;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod router;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum_tracing_opentelemetry::middleware::{OtelAxumLayer, OtelInResponseLayer};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};
use tower_http::timeout::TimeoutLayer;

use pragma_common::services::{Service, ServiceRunner};
use watch_allocations::ProtocolsByChain;

pub use config::ApiConfig;
use docs::ApiDoc;
use router::api_router;

#[derive(Clone)]
pub struct AppState {
    pub allocations: watch::Receiver<Arc<ProtocolsByChain>>,
}

impl AppState {
    /// Latest published allocations. Cloning the `Arc` releases the channel
    /// lock right away.
    pub fn current_allocations(&self) -> Arc<ProtocolsByChain> {
        self.allocations.borrow().clone()
    }
}

pub struct ApiService {
    state: AppState,
    config: ApiConfig,
    host: String,
    port: u16,
}

impl ApiService {
    pub fn new(state: AppState, config: ApiConfig, host: &str, port: u16) -> Self {
        Self {
            state,
            config,
            host: host.to_owned(),
            port,
        }
    }
}

#[async_trait::async_trait]
impl Service for ApiService {
    async fn start<'a>(&mut self, mut runner: ServiceRunner<'a>) -> anyhow::Result<()> {
        ApiDoc::write_json(Path::new("./"))?;

        let host = self.host.clone();
        let port = self.port;
        let state = self.state.clone();
        let config = self.config.clone();

        runner.spawn_loop(move |ctx| async move {
            let address = format!("{host}:{port}");
            let socket_addr: SocketAddr = address.parse()?;
            let listener = TcpListener::bind(socket_addr).await?;

            tracing::info!(
                timeout_secs = config.request_timeout.as_secs(),
                "Request timeout configured"
            );

            #[allow(clippy::default_constructed_unit_structs)]
            let app = {
                let base = api_router::<ApiDoc>(state.clone())
                    .with_state(state)
                    // include trace context as header into the response
                    //start OpenTelemetry trace on incoming request
                    .layer(OtelAxumLayer::default())
                    .layer(OtelInResponseLayer::default());

                let base = if config.rate_limit_enabled {
                    let governor_conf = GovernorConfigBuilder::default()
                        .per_second(config.rate_limit_per_second)
                        .burst_size(config.rate_limit_burst_size)
                        .key_extractor(SmartIpKeyExtractor)
                        .use_headers()
                        .finish()
                        .context("invalid rate limiting configuration")?;

                    let governor_limiter = governor_conf.limiter().clone();
                    let cancel_token = ctx.token.clone();
                    let cleanup_interval = config.rate_limit_cleanup_interval;
                    tokio::spawn(async move {
                        let mut ticker = tokio::time::interval(cleanup_interval);
                        loop {
                            tokio::select! {
                                _ = ticker.tick() => {
                                    tracing::debug!("rate limiting storage size: {}", governor_limiter.len());
                                    governor_limiter.retain_recent();
                                }
                                () = cancel_token.cancelled() => {
                                    tracing::debug!("rate limiter cleanup task shutting down");
                                    break;
                                }
                            }
                        }
                    });

                    base.layer(GovernorLayer::new(governor_conf))
                } else {
                    tracing::info!("rate limiter disabled via env");
                    base
                };

                base.layer(TimeoutLayer::new(config.request_timeout))
                    .layer(config.cors_layer())
            };

            tracing::info!("🧩 API started at http://{}", socket_addr);

            let token = ctx.token.clone();
            let shutdown = async move { token.cancelled().await };

            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(shutdown)
            .await
            .context("😱 API server stopped!")
        });

        Ok(())
    }
}
