//! Read-only registry of configured farms for the active chain.
//!
//! [`PoolRegistry`] is loaded once at startup from a JSON array of
//! [`FarmDefinition`]s. Every definition is resolved to a [`PoolConfig`]
//! for the configured chain id, so the valuation code never branches on
//! chain ids. Registry order is preserved.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use super::pool_config::{FarmDefinition, PoolConfig};

/// Failure while loading the farm registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("cannot read farm registry {path}: {reason}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },

    /// The registry is not a valid JSON array of farm definitions.
    #[error("invalid farm registry: {0}")]
    Parse(String),

    /// A farm has no (or an empty) address for the active chain.
    #[error("farm {pid} has no {field} address for chain {chain_id}")]
    MissingAddress {
        /// Farm pool id.
        pid: u32,
        /// Which address is missing.
        field: &'static str,
        /// Active chain id.
        chain_id: u64,
    },

    /// A farm address is not a valid 20-byte hex address.
    #[error("farm {pid} has invalid {field} address {value:?}: {reason}")]
    InvalidAddress {
        /// Farm pool id.
        pid: u32,
        /// Which address is invalid.
        field: &'static str,
        /// Offending value.
        value: String,
        /// Parser error.
        reason: String,
    },

    /// Two farms share the same pool id.
    #[error("duplicate farm pid {0}")]
    DuplicatePid(u32),
}

/// Ordered, immutable set of pools for one chain.
#[derive(Debug, Clone, Default)]
pub struct PoolRegistry {
    pools: Vec<PoolConfig>,
}

impl PoolRegistry {
    /// Builds a registry from already-resolved pools.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicatePid`] if two pools share a pid.
    pub fn new(pools: Vec<PoolConfig>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(pools.len());
        for pool in &pools {
            if !seen.insert(pool.pid) {
                return Err(RegistryError::DuplicatePid(pool.pid));
            }
        }
        Ok(Self { pools })
    }

    /// Resolves `definitions` for `chain_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] if any definition lacks a valid address
    /// for the chain or pids collide.
    pub fn from_definitions(
        definitions: &[FarmDefinition],
        chain_id: u64,
    ) -> Result<Self, RegistryError> {
        let pools = definitions
            .iter()
            .map(|def| def.resolve(chain_id))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(pools)
    }

    /// Parses a JSON array of farm definitions and resolves it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] on malformed JSON, or any error from
    /// [`Self::from_definitions`].
    pub fn from_json(json: &str, chain_id: u64) -> Result<Self, RegistryError> {
        let definitions: Vec<FarmDefinition> =
            serde_json::from_str(json).map_err(|e| RegistryError::Parse(e.to_string()))?;
        Self::from_definitions(&definitions, chain_id)
    }

    /// Reads and resolves the registry file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Io`] if the file cannot be read, or any
    /// error from [`Self::from_json`].
    pub fn load(path: impl AsRef<Path>, chain_id: u64) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| RegistryError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let registry = Self::from_json(&json, chain_id)?;
        tracing::info!(
            path = %path.display(),
            chain_id,
            pools = registry.len(),
            "farm registry loaded"
        );
        Ok(registry)
    }

    /// Returns all pools in registry order.
    #[must_use]
    pub fn pools(&self) -> &[PoolConfig] {
        &self.pools
    }

    /// Returns the pool with the given pid.
    #[must_use]
    pub fn get(&self, pid: u32) -> Option<&PoolConfig> {
        self.pools.iter().find(|pool| pool.pid == pid)
    }

    /// Returns the number of pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if no pools are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
