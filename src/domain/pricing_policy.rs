//! Named pricing heuristics shared by valuation and aggregation.

/// Pool id whose token price is the native currency price in the quote unit.
pub const DEFAULT_REFERENCE_POOL_ID: u32 = 2;

/// Stable token symbol priced at exactly one against itself.
pub const DEFAULT_STABLE_SYMBOL: &str = "BUSD";

/// Native currency symbol whose quoted pools need converting.
pub const DEFAULT_NATIVE_SYMBOL: &str = "BNB";

/// Symbols and ids the valuation engine treats specially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Pid of the pool pricing the native currency (e.g. BNB-BUSD).
    pub reference_pool_id: u32,
    /// Stable token symbol; a single-asset stable/stable pool has price 1.
    pub stable_symbol: String,
    /// Native currency symbol; pools quoted in it are converted with the
    /// reference pool price.
    pub native_symbol: String,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            reference_pool_id: DEFAULT_REFERENCE_POOL_ID,
            stable_symbol: DEFAULT_STABLE_SYMBOL.to_string(),
            native_symbol: DEFAULT_NATIVE_SYMBOL.to_string(),
        }
    }
}

impl PricingPolicy {
    /// Returns `true` if both symbols are the stable symbol.
    #[must_use]
    pub fn is_stable_pair(&self, token_symbol: &str, quote_symbol: &str) -> bool {
        token_symbol == self.stable_symbol && quote_symbol == self.stable_symbol
    }
}
