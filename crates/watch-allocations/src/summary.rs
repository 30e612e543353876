use std::collections::{BTreeMap, btree_map::Entry};
use std::iter;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use watch_types::{ALL_CHAINS, SortBy, SortOrder};

use crate::normalize::percentage_of;

/// How much of a chain's TVL is deployed into one protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProtocolSummary {
    pub name: String,
    /// USD value deployed into the protocol
    pub tvl: Decimal,
    /// USD contribution of every funded strategy
    pub strategies_tvl: BTreeMap<String, Decimal>,
    /// Distinct strategies that ever contributed, funded or not
    pub strategies_amount: usize,
    /// Strategies whose first contribution was strictly positive
    pub allocated_strategies: usize,
    /// Strategies that ended up with exactly zero
    pub empty_strategies: Vec<String>,
    /// Share of the chain TVL, in percent
    pub total_debt_ratio: Decimal,
}

impl ProtocolSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds one strategy contribution. Only the first contribution of a
    /// strategy decides whether it counts as allocated.
    pub(crate) fn record(&mut self, strategy: &str, value: Decimal) {
        self.tvl = self.tvl.saturating_add(value);
        match self.strategies_tvl.entry(strategy.to_owned()) {
            Entry::Occupied(mut entry) => {
                let total = entry.get().saturating_add(value);
                entry.insert(total);
            }
            Entry::Vacant(entry) => {
                if value > Decimal::ZERO {
                    self.allocated_strategies += 1;
                }
                entry.insert(value);
            }
        }
    }

    /// Counts strategies, then moves the zero-valued ones to `empty_strategies`.
    /// The count is taken before pruning so empty strategies stay included.
    pub(crate) fn finalize(&mut self, chain_tvl: Decimal) {
        self.strategies_amount = self.strategies_tvl.len();

        let empty = &mut self.empty_strategies;
        self.strategies_tvl.retain(|name, value| {
            if value.is_zero() {
                empty.push(name.clone());
                false
            } else {
                true
            }
        });

        self.total_debt_ratio = percentage_of(self.tvl, chain_tvl);
    }
}

/// Protocol allocations of one chain, or of every chain for [`ALL_CHAINS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChainSummary {
    pub name: String,
    pub tvl_total: Decimal,
    pub list: BTreeMap<String, ProtocolSummary>,
    pub protocols_count: usize,
}

impl ChainSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub(crate) fn record(&mut self, protocol: &str, strategy: &str, value: Decimal) {
        self.list
            .entry(protocol.to_owned())
            .or_insert_with(|| ProtocolSummary::new(protocol))
            .record(strategy, value);
        self.tvl_total = self.tvl_total.saturating_add(value);
    }

    pub(crate) fn finalize(&mut self) {
        self.protocols_count = self.list.len();
        let tvl_total = self.tvl_total;
        for protocol in self.list.values_mut() {
            protocol.finalize(tvl_total);
        }
    }

    /// Table rows ordered by a column, ties broken by protocol name.
    pub fn sorted_rows(&self, sort_by: SortBy, order: SortOrder) -> Vec<&ProtocolSummary> {
        let mut rows: Vec<&ProtocolSummary> = self.list.values().collect();
        rows.sort_by(|a, b| {
            let ordering = match sort_by {
                SortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                SortBy::Tvl => a.tvl.cmp(&b.tvl),
                SortBy::StrategiesAmount => a.strategies_amount.cmp(&b.strategies_amount),
                SortBy::AllocatedStrategiesAmount => {
                    a.allocated_strategies.cmp(&b.allocated_strategies)
                }
            };
            let ordering = match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            ordering.then_with(|| a.name.cmp(&b.name))
        });
        rows
    }
}

/// Allocation summaries keyed by chain: the synthetic `All` chain first, then
/// every input chain in the order it was first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolsByChain {
    pub(crate) all: ChainSummary,
    pub(crate) chains: Vec<ChainSummary>,
}

impl Default for ProtocolsByChain {
    fn default() -> Self {
        Self {
            all: ChainSummary::new(ALL_CHAINS),
            chains: Vec::new(),
        }
    }
}

impl ProtocolsByChain {
    pub const fn all(&self) -> &ChainSummary {
        &self.all
    }

    pub fn chains(&self) -> &[ChainSummary] {
        &self.chains
    }

    /// Looks a chain up by name, `All` included.
    pub fn get(&self, name: &str) -> Option<&ChainSummary> {
        if name == ALL_CHAINS {
            return Some(&self.all);
        }
        self.chains.iter().find(|chain| chain.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainSummary> {
        iter::once(&self.all).chain(self.chains.iter())
    }

    pub fn chain_names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|chain| chain.name.as_str())
    }

    /// Index of the named chain, created empty on first use.
    pub(crate) fn chain_index(&mut self, name: &str) -> usize {
        if let Some(index) = self.chains.iter().position(|chain| chain.name == name) {
            return index;
        }
        self.chains.push(ChainSummary::new(name));
        self.chains.len() - 1
    }

    pub(crate) fn finalize(&mut self) {
        self.all.finalize();
        for chain in &mut self.chains {
            chain.finalize();
        }
    }
}
