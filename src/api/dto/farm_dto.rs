//! Farm valuation DTOs for `GET /api/v1/farms`.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::PoolValuation;

/// One farm's staked amount, value and price.
///
/// Decimal quantities are rendered as strings; undefined values are `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FarmValuationDto {
    /// Farm (pool) id.
    pub pid: u32,
    /// LP share symbol.
    pub lp_symbol: String,
    /// LP share contract.
    pub lp_address: String,
    /// Priced token symbol.
    pub token_symbol: String,
    /// Quote token symbol.
    pub quote_token_symbol: String,
    /// Single-asset staking pool.
    pub is_token_only: bool,
    /// Staked amount of the priced token.
    #[schema(example = "1234.5")]
    pub token_amount: String,
    /// Staked value in quote token units.
    #[schema(example = "60000")]
    pub value_in_quote: Option<String>,
    /// Quote units per token unit.
    #[schema(example = "300")]
    pub token_price_vs_quote: Option<String>,
}

impl From<&PoolValuation> for FarmValuationDto {
    fn from(v: &PoolValuation) -> Self {
        Self {
            pid: v.config.pid,
            lp_symbol: v.config.lp_symbol.clone(),
            lp_address: v.config.lp_address.to_checksum(None),
            token_symbol: v.config.token_symbol.clone(),
            quote_token_symbol: v.config.quote_token_symbol.clone(),
            is_token_only: v.config.is_token_only,
            token_amount: v.token_amount.normalize().to_string(),
            value_in_quote: v.value_in_quote.map(|d| d.normalize().to_string()),
            token_price_vs_quote: v.token_price_vs_quote.map(|d| d.normalize().to_string()),
        }
    }
}
