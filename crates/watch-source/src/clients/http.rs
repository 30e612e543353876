use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use url::Url;
use watch_types::ChainData;

use crate::{error::SourceError, traits::VaultSource};

/// Fetches the snapshot from an HTTP endpoint serving a JSON array of chains.
///
/// Responses are cached for `cache_ttl` so several refreshes inside the window
/// hit the upstream once.
pub struct HttpSource {
    client: reqwest::Client,
    url: Url,
    cache: Cache<String, Arc<Vec<ChainData>>>,
}

impl HttpSource {
    pub fn new(url: Url, cache_ttl: Duration, request_timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self { client, url, cache })
    }

    async fn fetch_remote(&self) -> Result<Vec<ChainData>, SourceError> {
        let chains = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<ChainData>>()
            .await?;
        Ok(chains)
    }
}

#[async_trait::async_trait]
impl VaultSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_chains(&self) -> Result<Vec<ChainData>, SourceError> {
        let cache_key = self.url.to_string();
        if let Some(cached) = self.cache.get(&cache_key).await {
            return Ok(cached.as_ref().clone());
        }

        let chains = self.fetch_remote().await?;
        tracing::debug!(url = %self.url, chains = chains.len(), "Fetched vault snapshot");
        self.cache.insert(cache_key, Arc::new(chains.clone())).await;
        Ok(chains)
    }
}
