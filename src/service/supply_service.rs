//! Token supply service: total and circulating supply of the project token.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;

use crate::chain::{BatchReader, ReadError, ReadRequest};
use crate::domain::units::{WEI_DECIMALS, to_units};
use crate::error::GatewayError;

/// Reads the project token supply.
#[derive(Debug, Clone)]
pub struct SupplyService {
    reader: Arc<dyn BatchReader>,
    token_address: Address,
    burn_address: Address,
}

impl SupplyService {
    /// Creates a new `SupplyService`.
    #[must_use]
    pub fn new(reader: Arc<dyn BatchReader>, token_address: Address, burn_address: Address) -> Self {
        Self {
            reader,
            token_address,
            burn_address,
        }
    }

    /// Total supply minus the balance held by the burn address, truncated
    /// to whole tokens.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Read`] if the batch fails and
    /// [`GatewayError::Internal`] if more tokens are burnt than exist.
    pub async fn compute_circulating_supply(&self) -> Result<Decimal, GatewayError> {
        let requests = [
            ReadRequest::total_supply(self.token_address),
            ReadRequest::balance_of(self.token_address, self.burn_address),
        ];
        let values = self.reader.read_batch(&requests).await?;
        let [total, burnt] = values.as_slice() else {
            return Err(ReadError::ResultCount {
                expected: requests.len(),
                actual: values.len(),
            }
            .into());
        };
        let total = total.as_uint(0)?;
        let burnt = burnt.as_uint(1)?;

        let circulating = total.checked_sub(burnt).ok_or_else(|| {
            GatewayError::Internal(format!("burnt balance {burnt} exceeds total supply {total}"))
        })?;
        let supply = whole_tokens(circulating)?;
        tracing::info!(circulating = %supply, "circulating supply computed");
        Ok(supply)
    }

    /// Total supply of the project token, truncated to whole tokens.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Read`] if the read fails.
    pub async fn compute_total_supply(&self) -> Result<Decimal, GatewayError> {
        let values = self
            .reader
            .read_batch(&[ReadRequest::total_supply(self.token_address)])
            .await?;
        let [total] = values.as_slice() else {
            return Err(ReadError::ResultCount {
                expected: 1,
                actual: values.len(),
            }
            .into());
        };
        let supply = whole_tokens(total.as_uint(0)?)?;
        tracing::info!(total = %supply, "total supply computed");
        Ok(supply)
    }
}

fn whole_tokens(raw: U256) -> Result<Decimal, GatewayError> {
    Ok(to_units(raw, WEI_DECIMALS)?.trunc())
}
