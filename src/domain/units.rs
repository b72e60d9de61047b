//! Conversion of raw on-chain integers into decimals.
//!
//! Raw values are 256-bit; a [`Decimal`] holds a 96-bit mantissa and at
//! most 28 fractional digits. Both conversions work on [`U256`] first and
//! narrow last, keeping as many significant digits as the mantissa holds.

use alloy_primitives::U256;
use rust_decimal::Decimal;

use super::valuation::ValuationError;

/// Fixed exponent of LP value and the project token supply.
pub const WEI_DECIMALS: u8 = 18;

/// Largest scale a [`Decimal`] accepts.
const MAX_SCALE: u32 = 28;

/// Largest integer a [`Decimal`] mantissa holds, `2^96 - 1`.
const MAX_MANTISSA: u128 = (1 << 96) - 1;

fn pow10(exp: u32) -> U256 {
    U256::from(10u8).pow(U256::from(exp))
}

fn narrow(mantissa: U256, scale: u32) -> Option<Decimal> {
    let mantissa = i128::try_from(u128::try_from(mantissa).ok()?).ok()?;
    Decimal::try_from_i128_with_scale(mantissa, scale).ok()
}

/// Returns `raw / 10^decimals`.
///
/// Exact whenever `raw` fits the mantissa and `decimals <= 28`. Otherwise
/// the least significant fractional digits are truncated until it fits.
///
/// # Errors
///
/// Returns [`ValuationError::Overflow`] if the whole-unit value itself
/// exceeds [`Decimal::MAX`].
pub fn to_units(raw: U256, decimals: u8) -> Result<Decimal, ValuationError> {
    let ten = U256::from(10u8);
    let max = U256::from(MAX_MANTISSA);
    let mut mantissa = raw;
    let mut scale = u32::from(decimals);

    while mantissa > max || scale > MAX_SCALE {
        if scale == 0 {
            return Err(ValuationError::Overflow {
                raw: raw.to_string(),
                decimals,
            });
        }
        mantissa /= ten;
        scale -= 1;
    }

    narrow(mantissa, scale).ok_or_else(|| ValuationError::Overflow {
        raw: raw.to_string(),
        decimals,
    })
}

/// Returns `numerator / denominator` for two raw integers of the same unit,
/// truncated to the finest scale whose quotient fits the mantissa.
///
/// Decimals cancel out because both values come from the same unit.
/// `None` if the denominator is zero or the quotient exceeds
/// [`Decimal::MAX`].
#[must_use]
pub fn raw_ratio(numerator: U256, denominator: U256) -> Option<Decimal> {
    if denominator.is_zero() {
        return None;
    }
    let max = U256::from(MAX_MANTISSA);
    (0..=MAX_SCALE).rev().find_map(|scale| {
        let quotient = numerator.checked_mul(pow10(scale))? / denominator;
        if quotient > max {
            return None;
        }
        narrow(quotient, scale)
    })
}
