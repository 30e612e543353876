use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::lenient;

/// Vaults deployed on a single network, as served by the upstream data layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChainData {
    pub chain_name: String,
    #[serde(default)]
    pub vaults: Vec<Vault>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Vault {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Fixed-point precision of the underlying asset
    #[serde(default, deserialize_with = "lenient::decimals")]
    pub decimals: u32,
    /// USD price of one unit of the underlying asset
    #[serde(default, deserialize_with = "lenient::price")]
    pub price: Decimal,
    #[serde(default)]
    pub strategies: Vec<Strategy>,
}

impl Vault {
    /// Label used in logs, falls back to the address when the vault has no name.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.address.as_deref())
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Strategy {
    #[serde(default)]
    pub name: String,
    /// Raw total debt, scaled by the owning vault's `decimals`
    #[serde(default, deserialize_with = "lenient::raw_amount")]
    pub total_debt: Option<String>,
    /// Protocols the strategy deploys capital into
    #[serde(default)]
    pub protocols: Option<Vec<String>>,
}
