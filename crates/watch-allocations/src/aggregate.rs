use rust_decimal::Decimal;
use watch_types::{ALL_CHAINS, ChainData, Strategy, Vault};

use crate::{
    normalize::{to_normalized_value, usd_value},
    summary::ProtocolsByChain,
};

/// Builds the protocol allocation summaries of every chain from scratch.
///
/// Every strategy contribution is recorded twice: under its own chain and under
/// the synthetic `All` chain, so `All` always sums up the individual chains.
/// Strategies without a protocol list are ignored and malformed debts count as
/// zero. The function is pure: the same snapshot always gives the same result.
pub fn aggregate(chains: &[ChainData]) -> ProtocolsByChain {
    let mut protocols = ProtocolsByChain::default();
    if chains.is_empty() {
        return protocols;
    }

    for chain_data in chains {
        let chain_name = chain_data.chain_name.as_str();
        let chain_index = if chain_name == ALL_CHAINS {
            tracing::warn!(
                chain = chain_name,
                "Chain name collides with the aggregate, counting it in the aggregate only"
            );
            None
        } else {
            Some(protocols.chain_index(chain_name))
        };

        for vault in &chain_data.vaults {
            for strategy in &vault.strategies {
                let Some(strategy_protocols) = strategy.protocols.as_deref() else {
                    continue;
                };
                if strategy_protocols.is_empty() {
                    continue;
                }

                let value = strategy_usd_value(chain_name, vault, strategy);
                for protocol in strategy_protocols {
                    if let Some(index) = chain_index {
                        protocols.chains[index].record(protocol, &strategy.name, value);
                    }
                    protocols.all.record(protocol, &strategy.name, value);
                }
            }
        }
    }

    protocols.finalize();

    tracing::debug!(
        chains = protocols.chains.len(),
        protocols = protocols.all.protocols_count,
        tvl_total = %protocols.all.tvl_total,
        "Aggregated protocol allocations"
    );

    protocols
}

fn strategy_usd_value(chain: &str, vault: &Vault, strategy: &Strategy) -> Decimal {
    let Some(raw_debt) = strategy.total_debt.as_deref() else {
        tracing::warn!(
            chain,
            vault = vault.label(),
            strategy = %strategy.name,
            "Strategy has no total debt, counting it as zero"
        );
        return Decimal::ZERO;
    };

    let Some(normalized) = to_normalized_value(raw_debt, vault.decimals) else {
        tracing::warn!(
            chain,
            vault = vault.label(),
            strategy = %strategy.name,
            raw_debt,
            decimals = vault.decimals,
            "Could not normalize strategy debt, counting it as zero"
        );
        return Decimal::ZERO;
    };

    if vault.price < Decimal::ZERO {
        tracing::warn!(
            chain,
            vault = vault.label(),
            strategy = %strategy.name,
            price = %vault.price,
            "Vault has a negative price, counting it as zero"
        );
        return Decimal::ZERO;
    }

    usd_value(normalized, vault.price).unwrap_or_else(|| {
        tracing::warn!(
            chain,
            vault = vault.label(),
            strategy = %strategy.name,
            %normalized,
            price = %vault.price,
            "Strategy USD value overflows, counting it as zero"
        );
        Decimal::ZERO
    })
}
