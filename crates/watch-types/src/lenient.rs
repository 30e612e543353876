//! Field decoders that never reject a snapshot because of a single bad number.
//!
//! Upstream snapshots are produced by several indexers and numeric fields come
//! back as JSON numbers, decimal strings, hex strings or `null`. Each decoder
//! maps whatever it cannot read to "absent" so the aggregation counts it as a
//! zero contribution.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn raw_amount<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub fn price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        _ => None,
    }
    .filter(|price| *price >= Decimal::ZERO)
    .unwrap_or_default())
}

pub fn decimals<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .unwrap_or_default())
}

/// Parses plain (`"1.5"`) and scientific (`"1.5e-7"`) notations.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use crate::{ChainData, Strategy, Vault};

    #[test]
    fn test_decode_well_formed_snapshot() {
        let json = r#"[{
            "chain_name": "Ethereum",
            "vaults": [{
                "name": "yvUSDC",
                "decimals": 6,
                "price": 1.0,
                "strategies": [
                    {"name": "Alpha", "total_debt": "1000000", "protocols": ["Aave"]}
                ]
            }]
        }]"#;

        let chains: Vec<ChainData> = serde_json::from_str(json).unwrap();
        assert_eq!(chains.len(), 1);

        let vault = &chains[0].vaults[0];
        assert_eq!(vault.decimals, 6);
        assert_eq!(vault.price, dec!(1));
        assert_eq!(vault.label(), "yvUSDC");
        assert_eq!(
            vault.strategies[0],
            Strategy {
                name: "Alpha".to_string(),
                total_debt: Some("1000000".to_string()),
                protocols: Some(vec!["Aave".to_string()]),
            }
        );
    }

    #[test]
    fn test_decode_numeric_fields_in_any_shape() {
        let json = r#"{
            "decimals": "18",
            "price": "0.000000015",
            "strategies": [
                {"name": "Number", "total_debt": 42},
                {"name": "Hex", "total_debt": "0x2a"}
            ]
        }"#;

        let vault: Vault = serde_json::from_str(json).unwrap();
        assert_eq!(vault.decimals, 18);
        assert_eq!(vault.price, dec!(0.000000015));
        assert_eq!(vault.strategies[0].total_debt.as_deref(), Some("42"));
        assert_eq!(vault.strategies[1].total_debt.as_deref(), Some("0x2a"));
        assert_eq!(vault.strategies[0].protocols, None);
    }

    #[test]
    fn test_decode_scientific_price() {
        let vault: Vault = serde_json::from_str(r#"{"price": 1.5e-7}"#).unwrap();
        assert_eq!(vault.price, dec!(0.00000015));
    }

    #[test]
    fn test_decode_extreme_numbers() {
        let vault: Vault = serde_json::from_str(
            r#"{"decimals": 4294967295, "price": "-2", "strategies": [
                {"name": "Negative", "total_debt": "-500"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(vault.decimals, u32::MAX);
        assert_eq!(vault.price, dec!(0));
        assert_eq!(vault.strategies[0].total_debt.as_deref(), Some("-500"));

        let vault: Vault =
            serde_json::from_str(r#"{"decimals": 4294967296, "price": -1.5}"#).unwrap();
        assert_eq!(vault.decimals, 0);
        assert_eq!(vault.price, dec!(0));
    }

    #[test]
    fn test_malformed_fields_decode_as_absent() {
        let json = r#"{
            "decimals": -3,
            "price": {"usd": 1},
            "strategies": [
                {"name": "Null", "total_debt": null},
                {"name": "Empty", "total_debt": "  "},
                {"name": "Object", "total_debt": {"raw": "1"}},
                {"name": "Missing"}
            ]
        }"#;

        let vault: Vault = serde_json::from_str(json).unwrap();
        assert_eq!(vault.decimals, 0);
        assert_eq!(vault.price, dec!(0));
        assert!(vault.strategies.iter().all(|s| s.total_debt.is_none()));
        assert_eq!(vault.label(), "unknown");
    }

    #[test]
    fn test_non_array_root_is_rejected() {
        assert!(serde_json::from_str::<Vec<ChainData>>(r#"{"chain_name": "x"}"#).is_err());
    }
}
