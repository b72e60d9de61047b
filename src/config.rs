//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Required keys have no defaults; a
//! missing or malformed value fails startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use alloy_primitives::Address;
use thiserror::Error;

use crate::chain::MULTICALL3_ADDRESS;
use crate::domain::PricingPolicy;
use crate::domain::pricing_policy::{
    DEFAULT_NATIVE_SYMBOL, DEFAULT_REFERENCE_POOL_ID, DEFAULT_STABLE_SYMBOL,
};

/// Default `Cache-Control` max-age for supply endpoints.
pub const DEFAULT_SUPPLY_CACHE_MAX_AGE_SECS: u64 = 500;

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set or is empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// Parser error.
        reason: String,
    },
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// JSON-RPC endpoint of the chain node.
    pub rpc_url: String,

    /// Chain id used to resolve farm addresses.
    pub chain_id: u64,

    /// Project token contract (supply endpoints).
    pub token_address: Address,

    /// Address whose token balance counts as burnt.
    pub burn_address: Address,

    /// Staking (master chef) contract holding staked LP shares.
    pub staking_address: Address,

    /// Multicall contract used for batched reads.
    pub multicall_address: Address,

    /// Path to the JSON farm registry.
    pub farms_config: PathBuf,

    /// Reference pool id and special symbols.
    pub pricing: PricingPolicy,

    /// `Cache-Control` max-age for supply responses.
    pub supply_cache_max_age_secs: u64,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required variable is missing or any
    /// variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required key is missing or any value
    /// cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        Ok(Self {
            listen_addr: env.optional("LISTEN_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?,
            rpc_url: env.required_str("RPC_URL")?,
            chain_id: env.required("CHAIN_ID")?,
            token_address: env.required("TOKEN_ADDRESS")?,
            burn_address: env.required("BURN_ADDRESS")?,
            staking_address: env.required("STAKING_ADDRESS")?,
            multicall_address: env.optional("MULTICALL_ADDRESS", MULTICALL3_ADDRESS)?,
            farms_config: PathBuf::from(env.required_str("FARMS_CONFIG")?),
            pricing: PricingPolicy {
                reference_pool_id: env
                    .optional("REFERENCE_POOL_ID", DEFAULT_REFERENCE_POOL_ID)?,
                stable_symbol: env
                    .optional("STABLE_SYMBOL", DEFAULT_STABLE_SYMBOL.to_string())?,
                native_symbol: env
                    .optional("NATIVE_SYMBOL", DEFAULT_NATIVE_SYMBOL.to_string())?,
            },
            supply_cache_max_age_secs: env.optional(
                "SUPPLY_CACHE_MAX_AGE_SECS",
                DEFAULT_SUPPLY_CACHE_MAX_AGE_SECS,
            )?,
        })
    }
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required_str(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }

    fn required<T>(&self, key: &'static str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.required_str(key)?;
        parse(key, raw)
    }

    /// Parses an environment variable as `T`, returning `default` only when
    /// the variable is absent.
    fn optional<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key).map_or(Ok(default), |raw| parse(key, raw))
    }
}

fn parse<T>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw.parse() {
        Ok(value) => Ok(value),
        Err(e) => Err(ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value: raw,
        }),
    }
}
