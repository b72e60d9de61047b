//! Farm definitions as stored in the registry file and their resolved,
//! single-chain form.

use std::collections::HashMap;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use super::pool_registry::RegistryError;

/// Registry entry for one farm, with addresses keyed by chain id.
///
/// ```json
/// {
///   "pid": 2,
///   "lp_symbol": "BNB-BUSD LP",
///   "lp_addresses": { "56": "0x1b96...", "97": "0x..." },
///   "token_symbol": "BNB",
///   "token_addresses": { "56": "0xbb4c..." },
///   "quote_token_symbol": "BUSD",
///   "quote_token_addresses": { "56": "0xe9e7..." },
///   "is_token_only": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmDefinition {
    /// Pool id in the staking contract.
    pub pid: u32,
    /// Display symbol of the LP (or single) token.
    pub lp_symbol: String,
    /// LP pair address per chain id.
    pub lp_addresses: HashMap<u64, String>,
    /// Symbol of the priced token.
    pub token_symbol: String,
    /// Token address per chain id.
    pub token_addresses: HashMap<u64, String>,
    /// Symbol of the quote (reference) token.
    pub quote_token_symbol: String,
    /// Quote token address per chain id.
    pub quote_token_addresses: HashMap<u64, String>,
    /// `true` for single-asset pools that stake the token itself.
    #[serde(default)]
    pub is_token_only: bool,
}

impl FarmDefinition {
    /// Resolves every address for `chain_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingAddress`] if an address is absent or
    /// empty for the chain, and [`RegistryError::InvalidAddress`] if it
    /// cannot be parsed.
    pub fn resolve(&self, chain_id: u64) -> Result<PoolConfig, RegistryError> {
        Ok(PoolConfig {
            pid: self.pid,
            lp_symbol: self.lp_symbol.clone(),
            lp_address: resolve_address(self.pid, "lp", &self.lp_addresses, chain_id)?,
            token_symbol: self.token_symbol.clone(),
            token_address: resolve_address(self.pid, "token", &self.token_addresses, chain_id)?,
            quote_token_symbol: self.quote_token_symbol.clone(),
            quote_token_address: resolve_address(
                self.pid,
                "quote_token",
                &self.quote_token_addresses,
                chain_id,
            )?,
            is_token_only: self.is_token_only,
        })
    }
}

fn resolve_address(
    pid: u32,
    field: &'static str,
    addresses: &HashMap<u64, String>,
    chain_id: u64,
) -> Result<Address, RegistryError> {
    let raw = addresses
        .get(&chain_id)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or(RegistryError::MissingAddress {
            pid,
            field,
            chain_id,
        })?;
    raw.parse().map_err(|e| RegistryError::InvalidAddress {
        pid,
        field,
        value: raw.to_string(),
        reason: format!("{e}"),
    })
}

/// Immutable identity of one pool on the active chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Pool id in the staking contract.
    pub pid: u32,
    /// Display symbol of the LP (or single) token.
    pub lp_symbol: String,
    /// LP pair contract.
    pub lp_address: Address,
    /// Symbol of the priced token.
    pub token_symbol: String,
    /// Priced token contract.
    pub token_address: Address,
    /// Symbol of the quote (reference) token.
    pub quote_token_symbol: String,
    /// Quote token contract.
    pub quote_token_address: Address,
    /// `true` for single-asset pools.
    pub is_token_only: bool,
}
