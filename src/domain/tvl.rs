//! Aggregation of per-pool valuations into a total value locked.

use rust_decimal::{Decimal, RoundingStrategy};

use super::pricing_policy::PricingPolicy;
use super::valuation::PoolValuation;

/// Fractional digits in the formatted TVL.
pub const TVL_DECIMAL_PLACES: u32 = 2;

/// Returns the native currency price taken from the reference pool.
///
/// Falls back to zero when the reference pool is absent or has no price,
/// which degrades the total instead of failing it.
#[must_use]
pub fn native_price(valuations: &[PoolValuation], policy: &PricingPolicy) -> Decimal {
    let reference = valuations
        .iter()
        .find(|v| v.config.pid == policy.reference_pool_id);

    match reference.and_then(|v| v.token_price_vs_quote) {
        Some(price) => price,
        None => {
            tracing::warn!(
                reference_pool_id = policy.reference_pool_id,
                found = reference.is_some(),
                "reference pool price unavailable, pricing native-quoted pools at zero"
            );
            Decimal::ZERO
        }
    }
}

/// Sums every pool's quote-denominated value into the common quote unit.
///
/// Pools quoted in the native currency are converted with the reference
/// pool price. Pools without a defined value contribute nothing, and a
/// contribution that would overflow the decimal range is dropped.
#[must_use]
pub fn total_value_locked(valuations: &[PoolValuation], policy: &PricingPolicy) -> Decimal {
    let native = native_price(valuations, policy);

    valuations.iter().fold(Decimal::ZERO, |total, v| {
        let Some(value) = v.value_in_quote else {
            return total;
        };
        let contribution = if v.config.quote_token_symbol == policy.native_symbol {
            value.checked_mul(native)
        } else {
            Some(value)
        };
        match contribution.and_then(|c| total.checked_add(c)) {
            Some(sum) => sum,
            None => {
                tracing::warn!(
                    pid = v.config.pid,
                    value = %value,
                    "pool value overflows the total, excluded"
                );
                total
            }
        }
    })
}

/// Formats a TVL with exactly two fractional digits, rounding half away
/// from zero.
#[must_use]
pub fn format_tvl(total: Decimal) -> String {
    let mut rounded =
        total.round_dp_with_strategy(TVL_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(TVL_DECIMAL_PLACES);
    rounded.to_string()
}
