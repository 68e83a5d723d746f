//! Tradable universe

use rust_decimal::Decimal;

/// Placeholder volatile-name universe; in practice, built from scanner output
const DEFAULT_UNIVERSE: &[&str] = &[
    "NVAX", "GME", "PLTR", "MRNA", "BYND", "AMC", "RIOT", "CRSP", "HOOD", "DNA", "SOFI", "COIN",
    "AFRM", "LCID", "ROKU", "CVNA", "BILI", "BMBL", "UPST", "RBLX",
];

/// Symbols to scan for breakouts.
///
/// TODO: filter by ATR% and ADV from the data provider instead of the static
/// list; the filter arguments are accepted now so call sites don't change.
pub fn build_universe(_min_price: Decimal, _min_atr_pct: Decimal) -> Vec<String> {
    DEFAULT_UNIVERSE.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_universe_non_empty_and_unique() {
        let universe = build_universe(dec!(2), dec!(0.03));
        assert!(!universe.is_empty());
        let mut sorted = universe.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), universe.len());
    }
}
