use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use watch_allocations::{ChainOption, ChainSummary, ProtocolSummary, ProtocolsByChain, TableColumn};
use watch_types::{SortBy, SortOrder};

/// Allocations table of the selected chain
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AllocationsResponse {
    pub chain: String,
    pub sort_by: SortBy,
    pub order: SortOrder,
    pub tvl_total: Decimal,
    pub protocols_count: usize,
    pub rows: Vec<ProtocolSummary>,
}

impl AllocationsResponse {
    pub fn from_summary(summary: &ChainSummary, sort_by: SortBy, order: SortOrder) -> Self {
        Self {
            chain: summary.name.clone(),
            sort_by,
            order,
            tvl_total: summary.tvl_total,
            protocols_count: summary.protocols_count,
            rows: summary
                .sorted_rows(sort_by, order)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// Table of a chain missing from the data.
    pub fn empty(chain: &str, sort_by: SortBy, order: SortOrder) -> Self {
        Self {
            chain: chain.to_string(),
            sort_by,
            order,
            tvl_total: Decimal::ZERO,
            protocols_count: 0,
            rows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChainListResponse {
    pub selected: String,
    pub chains: Vec<ChainOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TableHeaderResponse {
    pub sort_by: SortBy,
    pub columns: Vec<TableColumn>,
}

/// Every chain summary, `All` first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AllocationsSummaryResponse {
    pub chains: Vec<ChainSummary>,
}

impl From<&ProtocolsByChain> for AllocationsSummaryResponse {
    fn from(protocols: &ProtocolsByChain) -> Self {
        Self {
            chains: protocols.iter().cloned().collect(),
        }
    }
}
