//! Service layer: on-chain reads and business logic orchestration.
//!
//! [`TvlService`] batches one read set per pool through a
//! [`crate::chain::BatchReader`] and aggregates the valuations;
//! [`SupplyService`] reads the project token supply.

pub mod supply_service;
pub mod tvl_service;

pub use supply_service::SupplyService;
pub use tvl_service::TvlService;
