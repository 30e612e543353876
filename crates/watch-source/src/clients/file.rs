use std::path::PathBuf;

use watch_types::ChainData;

use crate::{error::SourceError, traits::VaultSource};

/// Reads the snapshot from a JSON file on every fetch.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl VaultSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_chains(&self) -> Result<Vec<ChainData>, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::IoError {
                path: self.path.clone(),
                source,
            })?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    fn temp_snapshot(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "allocations-watch-{}-{name}.json",
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_reads_snapshot() {
        let path = temp_snapshot(
            "valid",
            r#"[{"chain_name": "Ethereum", "vaults": [{"decimals": 6, "price": 1.5}]}]"#,
        );

        let chains = FileSource::new(path.clone()).fetch_chains().await.unwrap();
        std::fs::remove_file(path).unwrap();

        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].chain_name, "Ethereum");
        assert_eq!(chains[0].vaults[0].price, dec!(1.5));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = FileSource::new(PathBuf::from("/definitely/not/here.json"));
        assert!(matches!(
            source.fetch_chains().await,
            Err(SourceError::IoError { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let path = temp_snapshot("invalid", "{not json");

        let result = FileSource::new(path.clone()).fetch_chains().await;
        std::fs::remove_file(path).unwrap();

        assert!(matches!(result, Err(SourceError::JsonError(_))));
    }
}
