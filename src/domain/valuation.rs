//! Per-pool valuation: staked amount, price and value in the quote token.
//!
//! Arithmetic is decimal, exact within 28 significant digits. Divisions
//! that would be undefined (zero supply, zero balance) and quantities
//! beyond the decimal range yield `None` instead of failing, so a pool with
//! missing or absurd data degrades the total instead of aborting it.

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use thiserror::Error;

use super::pool_config::PoolConfig;
use super::pricing_policy::PricingPolicy;
use super::units::{WEI_DECIMALS, raw_ratio, to_units};
use crate::chain::{ReadError, ReadRequest, ReadValue};

/// Number of reads issued per pool.
pub const READS_PER_POOL: usize = 6;

/// Raw on-chain value that cannot be held in a decimal.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// A raw on-chain value does not fit in a decimal.
    #[error("value {raw} with {decimals} decimals exceeds decimal precision")]
    Overflow {
        /// Raw integer, as a string.
        raw: String,
        /// Decimal count applied.
        decimals: u8,
    },
}

/// The six raw values read for one pool, in request order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawReadSet {
    /// Token balance held by the LP contract.
    pub token_balance_lp: U256,
    /// Quote token balance held by the LP contract.
    pub quote_balance_lp: U256,
    /// Staked balance (token or LP share) held by the staking contract.
    pub staked_balance: U256,
    /// Total supply of LP shares.
    pub lp_total_supply: U256,
    /// Token decimals.
    pub token_decimals: u8,
    /// Quote token decimals.
    pub quote_decimals: u8,
}

impl RawReadSet {
    /// Builds the ordered read requests for `pool`.
    ///
    /// The staked balance is read on the token itself for single-asset
    /// pools and on the LP share token otherwise.
    #[must_use]
    pub fn requests(pool: &PoolConfig, staking: Address) -> [ReadRequest; READS_PER_POOL] {
        let staked_target = if pool.is_token_only {
            pool.token_address
        } else {
            pool.lp_address
        };
        [
            ReadRequest::balance_of(pool.token_address, pool.lp_address),
            ReadRequest::balance_of(pool.quote_token_address, pool.lp_address),
            ReadRequest::balance_of(staked_target, staking),
            ReadRequest::total_supply(pool.lp_address),
            ReadRequest::decimals(pool.token_address),
            ReadRequest::decimals(pool.quote_token_address),
        ]
    }

    /// Assembles a read set from batch results in request order.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::ResultCount`] if the batch size is wrong and
    /// [`ReadError::UnexpectedValue`] if a value has the wrong type.
    pub fn from_values(values: &[ReadValue]) -> Result<Self, ReadError> {
        let [
            token_balance_lp,
            quote_balance_lp,
            staked_balance,
            lp_total_supply,
            token_decimals,
            quote_decimals,
        ] = values
        else {
            return Err(ReadError::ResultCount {
                expected: READS_PER_POOL,
                actual: values.len(),
            });
        };
        Ok(Self {
            token_balance_lp: token_balance_lp.as_uint(0)?,
            quote_balance_lp: quote_balance_lp.as_uint(1)?,
            staked_balance: staked_balance.as_uint(2)?,
            lp_total_supply: lp_total_supply.as_uint(3)?,
            token_decimals: token_decimals.as_decimals(4)?,
            quote_decimals: quote_decimals.as_decimals(5)?,
        })
    }
}

/// Derived valuation of one pool, carrying its configuration forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolValuation {
    /// Pool identity.
    pub config: PoolConfig,
    /// Staked amount of the priced token, in whole tokens.
    pub token_amount: Decimal,
    /// Staked value in quote token units, `None` when undefined.
    pub value_in_quote: Option<Decimal>,
    /// Quote units per token unit, `None` when undefined.
    pub token_price_vs_quote: Option<Decimal>,
}

/// Values `pool` from its raw reads.
///
/// Never fails: a quantity that is undefined or too large for a decimal is
/// `None`, and an unrepresentable token amount counts as zero.
#[must_use]
pub fn valuate(pool: &PoolConfig, raw: &RawReadSet, policy: &PricingPolicy) -> PoolValuation {
    let (token_amount, value_in_quote, token_price_vs_quote) = if pool.is_token_only {
        valuate_single_asset(pool, raw, policy)
    } else {
        valuate_pair(raw)
    };

    let token_amount = token_amount.unwrap_or_else(|| {
        tracing::warn!(
            pid = pool.pid,
            lp = %pool.lp_symbol,
            "staked token amount exceeds decimal range, counted as zero"
        );
        Decimal::ZERO
    });

    PoolValuation {
        config: pool.clone(),
        token_amount,
        value_in_quote,
        token_price_vs_quote,
    }
}

type Derived = (Option<Decimal>, Option<Decimal>, Option<Decimal>);

fn units(raw: U256, decimals: u8) -> Option<Decimal> {
    to_units(raw, decimals).ok()
}

fn valuate_single_asset(pool: &PoolConfig, raw: &RawReadSet, policy: &PricingPolicy) -> Derived {
    let token_amount = units(raw.staked_balance, raw.token_decimals);

    let price = if policy.is_stable_pair(&pool.token_symbol, &pool.quote_token_symbol) {
        Some(Decimal::ONE)
    } else {
        raw_ratio(raw.quote_balance_lp, raw.token_balance_lp)
    };

    let value = token_amount
        .zip(price)
        .and_then(|(amount, p)| amount.checked_mul(p));
    (token_amount, value, price)
}

fn valuate_pair(raw: &RawReadSet) -> Derived {
    let share_ratio = raw_ratio(raw.staked_balance, raw.lp_total_supply);

    // The quote side is half of the pool's value.
    let value = share_ratio.and_then(|ratio| {
        units(raw.quote_balance_lp, WEI_DECIMALS)?
            .checked_mul(Decimal::TWO)?
            .checked_mul(ratio)
    });

    let ratio = share_ratio.unwrap_or(Decimal::ZERO);
    let token_amount =
        units(raw.token_balance_lp, raw.token_decimals).and_then(|t| t.checked_mul(ratio));
    let quote_amount =
        units(raw.quote_balance_lp, raw.quote_decimals).and_then(|q| q.checked_mul(ratio));

    let price = match token_amount {
        Some(amount) if amount > Decimal::ZERO => quote_amount.and_then(|q| q.checked_div(amount)),
        Some(_) => raw_ratio(raw.quote_balance_lp, raw.token_balance_lp),
        None => None,
    };

    (token_amount, value, price)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::str::FromStr;

    use rust_decimal_macros::dec;

    use super::*;

    fn pool(is_token_only: bool, token: &str, quote: &str) -> PoolConfig {
        PoolConfig {
            pid: 1,
            lp_symbol: format!("{token}-{quote}"),
            lp_address: Address::repeat_byte(0x01),
            token_symbol: token.to_string(),
            token_address: Address::repeat_byte(0x02),
            quote_token_symbol: quote.to_string(),
            quote_token_address: Address::repeat_byte(0x03),
            is_token_only,
        }
    }

    fn wei(whole: u64) -> U256 {
        U256::from(whole) * U256::from(10u64).pow(U256::from(18u64))
    }

    fn reads(token_lp: U256, quote_lp: U256, staked: U256, supply: U256) -> RawReadSet {
        RawReadSet {
            token_balance_lp: token_lp,
            quote_balance_lp: quote_lp,
            staked_balance: staked,
            lp_total_supply: supply,
            token_decimals: 18,
            quote_decimals: 18,
        }
    }

    fn run(pool: &PoolConfig, raw: &RawReadSet) -> PoolValuation {
        valuate(pool, raw, &PricingPolicy::default())
    }

    #[test]
    fn stable_single_asset_price_is_exactly_one() {
        let p = pool(true, "BUSD", "BUSD");
        // Balances in the LP are irrelevant for the stable pair.
        let v = run(&p, &reads(wei(3), wei(7), wei(250), wei(1)));
        assert_eq!(v.token_price_vs_quote, Some(Decimal::ONE));
        assert_eq!(v.token_amount, dec!(250));
        assert_eq!(v.value_in_quote, Some(dec!(250)));
    }

    #[test]
    fn single_asset_uses_raw_balance_ratio() {
        let p = pool(true, "EGG", "BUSD");
        let v = run(&p, &reads(wei(1_000), wei(500), wei(40), wei(10)));
        assert_eq!(v.token_price_vs_quote, Some(dec!(0.5)));
        assert_eq!(v.token_amount, dec!(40));
        assert_eq!(v.value_in_quote, Some(dec!(20)));
    }

    #[test]
    fn single_asset_without_liquidity_has_no_price() {
        let p = pool(true, "EGG", "BUSD");
        let v = run(&p, &reads(U256::ZERO, wei(5), wei(40), wei(10)));
        assert_eq!(v.token_amount, dec!(40));
        assert!(v.token_price_vs_quote.is_none());
        assert!(v.value_in_quote.is_none());
    }

    #[test]
    fn pair_value_is_twice_quote_share() {
        let p = pool(false, "EGG", "BUSD");
        // 25% of shares staked; pool holds 2000 EGG and 1000 BUSD.
        let v = run(&p, &reads(wei(2_000), wei(1_000), wei(25), wei(100)));
        assert_eq!(v.value_in_quote, Some(dec!(500)));
        assert_eq!(v.token_amount, dec!(500));
        assert_eq!(v.token_price_vs_quote, Some(dec!(0.5)));
    }

    #[test]
    fn zero_stake_falls_back_to_raw_ratio() {
        let p = pool(false, "EGG", "BUSD");
        let v = run(&p, &reads(wei(2_000), wei(1_000), U256::ZERO, wei(100)));
        assert_eq!(v.token_amount, Decimal::ZERO);
        assert_eq!(v.value_in_quote, Some(Decimal::ZERO));
        assert_eq!(v.token_price_vs_quote, Some(dec!(0.5)));
    }

    #[test]
    fn zero_supply_leaves_value_undefined() {
        let p = pool(false, "EGG", "BUSD");
        let v = run(&p, &reads(wei(2_000), wei(1_000), U256::ZERO, U256::ZERO));
        assert_eq!(v.token_amount, Decimal::ZERO);
        assert!(v.value_in_quote.is_none());
        assert_eq!(v.token_price_vs_quote, Some(dec!(0.5)));
    }

    #[test]
    fn mixed_decimals_keep_precision() {
        let p = pool(false, "CAKE9", "WBNB");
        let raw = RawReadSet {
            token_balance_lp: U256::from(123_456_789_123_456_789u64),
            quote_balance_lp: wei(3_000),
            staked_balance: U256::from(1u64),
            lp_total_supply: U256::from(3u64),
            token_decimals: 9,
            quote_decimals: 18,
        };
        let v = run(&p, &raw);

        let Ok(expected) = Decimal::from_str("41152263.041152263") else {
            panic!("valid literal");
        };
        let error = (v.token_amount - expected).abs();
        assert!(error < dec!(0.0000001), "token amount {} drifted", v.token_amount);

        // quote side: 3000 / 3 = 1000 WBNB staked
        let Some(price) = v.token_price_vs_quote else {
            panic!("price defined");
        };
        let expected_price = dec!(1000) / expected;
        assert!((price - expected_price).abs() < dec!(0.000000000001));
    }

    #[test]
    fn values_are_never_negative() {
        let p = pool(false, "EGG", "BUSD");
        for staked in [0u64, 1, 50, 100] {
            let v = run(&p, &reads(wei(7), wei(13), wei(staked), wei(100)));
            assert!(v.token_amount >= Decimal::ZERO);
            assert!(v.value_in_quote.is_none_or(|x| x >= Decimal::ZERO));
            assert!(v.token_price_vs_quote.is_none_or(|x| x >= Decimal::ZERO));
        }
    }

    #[test]
    fn balance_beyond_mantissa_is_still_valued() {
        let p = pool(false, "EGG", "BUSD");
        // 10^11 EGG in the pool, a raw value wider than the decimal mantissa
        let huge = U256::from(10u64).pow(U256::from(29u64));
        let v = run(&p, &reads(huge, wei(1_000), wei(25), wei(100)));
        assert_eq!(v.token_amount, dec!(25000000000));
        assert_eq!(v.value_in_quote, Some(dec!(500)));
        assert_eq!(v.token_price_vs_quote, Some(dec!(0.00000001)));
    }

    #[test]
    fn share_ratio_of_huge_supplies_is_exact() {
        let p = pool(false, "EGG", "BUSD");
        let supply = U256::from(4u64) * U256::from(10u64).pow(U256::from(30u64));
        let staked = U256::from(10u64).pow(U256::from(30u64));
        let v = run(&p, &reads(wei(2_000), wei(1_000), staked, supply));
        assert_eq!(v.value_in_quote, Some(dec!(500)));
        assert_eq!(v.token_amount, dec!(500));
    }

    #[test]
    fn unrepresentable_amount_degrades_instead_of_failing() {
        let p = pool(false, "EGG", "BUSD");
        let absurd = U256::from(10u64).pow(U256::from(60u64));
        let v = run(&p, &reads(absurd, wei(1_000), wei(1), wei(1)));
        assert_eq!(v.token_amount, Decimal::ZERO);
        assert!(v.token_price_vs_quote.is_none());
        assert_eq!(v.value_in_quote, Some(dec!(2000)));

        let single = pool(true, "EGG", "BUSD");
        let v = run(&single, &reads(wei(1), wei(1), absurd, wei(1)));
        assert_eq!(v.token_amount, Decimal::ZERO);
        assert!(v.value_in_quote.is_none());
    }

    #[test]
    fn requests_follow_fixed_order() {
        let staking = Address::repeat_byte(0x99);
        let lp = pool(false, "EGG", "BUSD");
        let requests = RawReadSet::requests(&lp, staking);
        assert_eq!(requests[2], ReadRequest::balance_of(lp.lp_address, staking));
        assert_eq!(requests[3], ReadRequest::total_supply(lp.lp_address));
        assert_eq!(requests[5], ReadRequest::decimals(lp.quote_token_address));

        let single = pool(true, "EGG", "BUSD");
        let requests = RawReadSet::requests(&single, staking);
        assert_eq!(
            requests[2],
            ReadRequest::balance_of(single.token_address, staking)
        );
    }

    #[test]
    fn read_set_rejects_short_batch() {
        let values = [ReadValue::Uint(U256::ZERO); 5];
        assert!(matches!(
            RawReadSet::from_values(&values),
            Err(ReadError::ResultCount {
                expected: 6,
                actual: 5
            })
        ));
    }

    #[test]
    fn read_set_rejects_mistyped_decimals() {
        let values = [ReadValue::Uint(U256::ZERO); 6];
        assert!(matches!(
            RawReadSet::from_values(&values),
            Err(ReadError::UnexpectedValue { index: 4, .. })
        ));
    }
}
