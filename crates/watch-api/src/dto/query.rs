use serde::Deserialize;
use utoipa::ToSchema;
use watch_types::ALL_CHAINS;

fn default_chain() -> String {
    ALL_CHAINS.to_string()
}

/// Query parameters for the allocations table endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct AllocationsQuery {
    #[serde(default = "default_chain")]
    pub chain: String,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// Query parameters for the chain selector endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChainsQuery {
    #[serde(default = "default_chain")]
    pub selected: String,
}

/// Query parameters for the table header endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct ColumnsQuery {
    pub sort_by: Option<String>,
}
