//! Trading pair identifiers.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbol suffix marking a USD-denominated pair on Indodax.
const USDT_SUFFIX: &str = "usdt";

/// A tradable symbol (base + quote, e.g. "BTCIDR").
///
/// The universe of pairs is fixed for a run: the list is fetched once at
/// startup and pairs are never added or removed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair(CompactString);

impl Pair {
    /// Create a pair from the symbol string returned by the pairs endpoint.
    pub fn new(symbol: &str) -> Self {
        Self(CompactString::new(symbol))
    }

    /// Symbol exactly as the exchange reported it.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase symbol for ticker endpoint paths.
    pub fn ticker_symbol(&self) -> String {
        self.0.to_lowercase().into()
    }

    /// Uppercase symbol for display and chart links.
    pub fn display_symbol(&self) -> String {
        self.0.to_uppercase().into()
    }

    /// Whether this pair is quoted in USDT rather than the local currency.
    /// Drives price formatting: USDT pairs keep full significance for
    /// micro-priced assets, IDR pairs render as whole amounts.
    pub fn is_usdt_quoted(&self) -> bool {
        self.0.to_lowercase().ends_with(USDT_SUFFIX)
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pair_symbols() {
        let pair = Pair::new("btc_idr");
        assert_eq!(pair.as_str(), "btc_idr");
        assert_eq!(pair.ticker_symbol(), "btc_idr");
        assert_eq!(pair.display_symbol(), "BTC_IDR");
    }

    #[test]
    fn test_symbols_are_owned_strings() {
        let pair = Pair::new("BtcIdr");
        let ticker: String = pair.ticker_symbol();
        let display: String = pair.display_symbol();
        assert_eq!(ticker, "btcidr");
        assert_eq!(display, "BTCIDR");
    }

    #[test]
    fn test_usdt_quoted() {
        assert!(Pair::new("btcusdt").is_usdt_quoted());
        assert!(Pair::new("BTCUSDT").is_usdt_quoted());
        assert!(!Pair::new("btcidr").is_usdt_quoted());
    }
}
