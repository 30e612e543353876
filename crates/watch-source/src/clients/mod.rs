mod file;
mod http;

use std::path::PathBuf;
use std::sync::Arc;

use url::Url;

use crate::{config::SourceConfig, error::SourceError, traits::VaultSource};

pub use file::FileSource;
pub use http::HttpSource;

/// Where the upstream snapshot lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotLocation {
    Url(Url),
    Path(PathBuf),
}

impl SnapshotLocation {
    /// Picks the location out of the CLI options, exactly one must be set.
    pub fn from_options(url: Option<Url>, path: Option<PathBuf>) -> Result<Self, SourceError> {
        match (url, path) {
            (Some(url), None) => Ok(Self::Url(url)),
            (None, Some(path)) => Ok(Self::Path(path)),
            (Some(_), Some(_)) => Err(SourceError::InvalidConfig(
                "snapshot url and snapshot path are mutually exclusive".to_string(),
            )),
            (None, None) => Err(SourceError::InvalidConfig(
                "either a snapshot url or a snapshot path is required".to_string(),
            )),
        }
    }
}

pub fn build_source(
    location: SnapshotLocation,
    config: &SourceConfig,
) -> Result<Arc<dyn VaultSource>, SourceError> {
    let source: Arc<dyn VaultSource> = match location {
        SnapshotLocation::Url(url) => Arc::new(HttpSource::new(
            url,
            config.cache_ttl,
            config.request_timeout,
        )?),
        SnapshotLocation::Path(path) => Arc::new(FileSource::new(path)),
    };
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_options() {
        let url = Url::parse("https://example.com/vaults.json").unwrap();
        let path = PathBuf::from("vaults.json");

        assert_eq!(
            SnapshotLocation::from_options(Some(url.clone()), None).unwrap(),
            SnapshotLocation::Url(url.clone())
        );
        assert_eq!(
            SnapshotLocation::from_options(None, Some(path.clone())).unwrap(),
            SnapshotLocation::Path(path.clone())
        );
        assert!(matches!(
            SnapshotLocation::from_options(Some(url), Some(path)),
            Err(SourceError::InvalidConfig(_))
        ));
        assert!(matches!(
            SnapshotLocation::from_options(None, None),
            Err(SourceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_build_source_names() {
        let config = SourceConfig::default();

        let file = build_source(SnapshotLocation::Path("vaults.json".into()), &config).unwrap();
        assert_eq!(file.name(), "file");

        let url = Url::parse("https://example.com/vaults.json").unwrap();
        let http = build_source(SnapshotLocation::Url(url), &config).unwrap();
        assert_eq!(http.name(), "http");
    }
}
