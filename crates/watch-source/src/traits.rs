use watch_types::ChainData;

use crate::error::SourceError;

#[async_trait::async_trait]
pub trait VaultSource: Send + Sync {
    /// Short identifier used in logs and metrics.
    fn name(&self) -> &str;

    /// Latest per-chain vault snapshot.
    async fn fetch_chains(&self) -> Result<Vec<ChainData>, SourceError>;
}
