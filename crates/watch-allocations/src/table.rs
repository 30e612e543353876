use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use utoipa::ToSchema;
use watch_types::{SortBy, SortOrder};

use crate::error::AllocationError;

/// Header cell of the allocations table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TableColumn {
    pub sort_id: SortBy,
    pub label: String,
    pub active: bool,
}

/// Sortable header of the allocations table, `tvl` first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableHeader {
    sort_by: SortBy,
}

impl TableHeader {
    pub const fn new(sort_by: SortBy) -> Self {
        Self { sort_by }
    }

    pub const fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    pub const fn select(&mut self, sort_by: SortBy) {
        self.sort_by = sort_by;
    }

    pub fn columns(&self) -> Vec<TableColumn> {
        SortBy::iter()
            .map(|sort_id| TableColumn {
                sort_id,
                label: sort_id.label().to_string(),
                active: sort_id == self.sort_by,
            })
            .collect()
    }
}

pub fn parse_sort_key(key: &str) -> Result<SortBy, AllocationError> {
    SortBy::from_str(key.trim()).map_err(|_| AllocationError::UnknownSortKey(key.to_string()))
}

pub fn parse_sort_order(order: &str) -> Result<SortOrder, AllocationError> {
    SortOrder::from_str(order.trim())
        .map_err(|_| AllocationError::UnknownSortOrder(order.to_string()))
}
