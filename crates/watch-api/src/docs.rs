#![allow(clippy::needless_for_each)]

use std::path::Path;

use anyhow::Context;
use utoipa::openapi::server::Server;
use utoipa::{Modify, OpenApi};
use utoipauto::utoipauto;

/// Mounts every documented path under `/v1`.
pub struct VersionPrefix;

impl Modify for VersionPrefix {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.servers = Some(vec![Server::new("/v1")]);
    }
}

#[utoipauto(paths = "./crates/watch-api/src/")]
#[derive(OpenApi)]
#[openapi(
    modifiers(&VersionPrefix),
    tags((name = "Allocations", description = "Protocol allocations per chain"))
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Writes `openapi.json` into `dir`.
    pub fn write_json(dir: &Path) -> anyhow::Result<()> {
        let file_path = dir.join("openapi.json");
        let json = serde_json::to_string_pretty(&Self::openapi())?;
        std::fs::write(&file_path, json)
            .with_context(|| format!("writing {}", file_path.display()))?;

        tracing::info!(path = %file_path.display(), "OpenAPI document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_allocation_endpoints() {
        let openapi = ApiDoc::openapi();

        for path in [
            "/allocations",
            "/allocations/chains",
            "/allocations/columns",
            "/allocations/summary",
            "/allocations/aggregate",
        ] {
            assert!(openapi.paths.paths.contains_key(path), "{path}");
        }
        assert!(openapi.paths.paths["/allocations/aggregate"].post.is_some());
        assert_eq!(openapi.servers.unwrap()[0].url, "/v1");
    }
}
