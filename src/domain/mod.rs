//! Domain layer: pool configuration, valuation and aggregation.
//!
//! Everything here is pure and synchronous. On-chain reads happen in the
//! service layer, which hands raw values to [`valuation::valuate`] and
//! the resulting valuations to [`tvl::total_value_locked`].

pub mod pool_config;
pub mod pool_registry;
pub mod pricing_policy;
pub mod tvl;
pub mod units;
pub mod valuation;

pub use pool_config::{FarmDefinition, PoolConfig};
pub use pool_registry::{PoolRegistry, RegistryError};
pub use pricing_policy::PricingPolicy;
pub use valuation::{PoolValuation, RawReadSet, ValuationError};
