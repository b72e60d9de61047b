//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{SupplyService, TvlService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Pool valuation and TVL aggregation.
    pub tvl_service: Arc<TvlService>,
    /// Project token supply.
    pub supply_service: Arc<SupplyService>,
    /// `Cache-Control` max-age for supply responses.
    pub supply_cache_max_age_secs: u64,
}
