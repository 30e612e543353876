use std::str::FromStr;

use rust_decimal::Decimal;

/// Number of significant digits that always fit in a `Decimal` mantissa.
const MAX_SIGNIFICANT_DIGITS: usize = 28;

/// Converts a raw fixed-point integer (decimal or `0x` hex) into a decimal
/// amount using the asset precision.
///
/// Fraction digits that do not fit are truncated. Returns `None` when the
/// input is not an unsigned integer or its whole part overflows a `Decimal`.
pub fn to_normalized_value(raw: &str, decimals: u32) -> Option<Decimal> {
    let raw = raw.trim();

    let digits = if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u128::from_str_radix(hex, 16).ok()?.to_string()
    } else {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.to_string()
    };

    // Every significant digit sits past the representable fraction
    let decimals = usize::try_from(decimals).ok()?;
    if decimals >= digits.len() + MAX_SIGNIFICANT_DIGITS {
        return Some(Decimal::ZERO);
    }

    let mut padded = "0".repeat((decimals + 1).saturating_sub(digits.len()));
    padded.push_str(&digits);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let whole = whole.trim_start_matches('0');
    if whole.len() > MAX_SIGNIFICANT_DIGITS {
        return None;
    }

    let fraction = &fraction[..fraction.len().min(MAX_SIGNIFICANT_DIGITS - whole.len())];
    let whole = if whole.is_empty() { "0" } else { whole };
    let text = if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    };

    Decimal::from_str(&text).ok()
}

/// USD value of a normalized amount, `None` on overflow.
pub fn usd_value(normalized: Decimal, price: Decimal) -> Option<Decimal> {
    normalized.checked_mul(price)
}

/// `part / total * 100`, zero when `total` is zero.
pub fn percentage_of(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_default()
}
