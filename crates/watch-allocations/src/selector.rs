use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use watch_types::ALL_CHAINS;

use crate::summary::{ChainSummary, ProtocolsByChain};

/// One entry of the network selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChainOption {
    pub name: String,
    pub selected: bool,
    pub tvl_total: Decimal,
    pub protocols_count: usize,
}

/// Tracks which chain the allocations table is filtered on.
///
/// Selection is never validated: an unknown chain simply yields an empty view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSelector {
    selected: String,
}

impl Default for ChainSelector {
    fn default() -> Self {
        Self::new(ALL_CHAINS)
    }
}

impl ChainSelector {
    pub fn new(selected: impl Into<String>) -> Self {
        Self {
            selected: selected.into(),
        }
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn select(&mut self, chain: impl Into<String>) {
        self.selected = chain.into();
    }

    /// Every known chain, `All` first, with the selected one flagged.
    pub fn options(&self, protocols: &ProtocolsByChain) -> Vec<ChainOption> {
        protocols
            .iter()
            .map(|chain| ChainOption {
                name: chain.name.clone(),
                selected: chain.name == self.selected,
                tvl_total: chain.tvl_total,
                protocols_count: chain.protocols_count,
            })
            .collect()
    }

    /// Summary of the selected chain, `None` when it is not in the data.
    pub fn view<'a>(&self, protocols: &'a ProtocolsByChain) -> Option<&'a ChainSummary> {
        protocols.get(&self.selected)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use watch_types::{ChainData, Strategy, Vault};

    use super::*;
    use crate::aggregate;

    fn snapshot() -> Vec<ChainData> {
        ["Ethereum", "Fantom"]
            .into_iter()
            .map(|name| ChainData {
                chain_name: name.to_string(),
                vaults: vec![Vault {
                    decimals: 0,
                    price: dec!(1),
                    strategies: vec![Strategy {
                        name: "Alpha".to_string(),
                        total_debt: Some("10".to_string()),
                        protocols: Some(vec!["Aave".to_string()]),
                    }],
                    ..Default::default()
                }],
            })
            .collect()
    }

    #[test]
    fn test_defaults_to_all() {
        let protocols = aggregate(&snapshot());
        let selector = ChainSelector::default();

        assert_eq!(selector.selected(), "All");
        assert_eq!(selector.view(&protocols).unwrap().tvl_total, dec!(20));

        let options = selector.options(&protocols);
        let names: Vec<_> = options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["All", "Ethereum", "Fantom"]);
        assert_eq!(
            options.iter().filter(|o| o.selected).count(),
            1,
            "exactly one option is selected"
        );
        assert!(options[0].selected);
    }

    #[test]
    fn test_select_chain() {
        let protocols = aggregate(&snapshot());
        let mut selector = ChainSelector::default();
        selector.select("Fantom");

        let view = selector.view(&protocols).unwrap();
        assert_eq!(view.name, "Fantom");
        assert_eq!(view.tvl_total, dec!(10));
        assert!(selector.options(&protocols)[2].selected);
    }

    #[test]
    fn test_unknown_chain_gives_empty_view() {
        let protocols = aggregate(&snapshot());
        let mut selector = ChainSelector::default();
        selector.select("Solana");

        assert_eq!(selector.selected(), "Solana");
        assert!(selector.view(&protocols).is_none());
        assert!(selector.options(&protocols).iter().all(|o| !o.selected));
    }
}
