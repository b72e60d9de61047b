//! # farm-tvl-gateway
//!
//! HTTP gateway that reports the total value locked (TVL) of a set of
//! liquidity-pool farms, per-farm valuations and the project token's
//! circulating supply.
//!
//! Every request reads fresh on-chain state: one multicall batch per pool,
//! all pools fetched concurrently. Valuation is exact decimal arithmetic;
//! a single failed read fails the whole request.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers + ResponseEnvelope (api/)
//!     │
//!     ├── TvlService, SupplyService (service/)
//!     │
//!     ├── PoolRegistry, valuation, TVL aggregation (domain/)
//!     │
//!     └── BatchReader → MulticallReader → JSON-RPC node (chain/)
//! ```

pub mod api;
pub mod app_state;
pub mod chain;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
