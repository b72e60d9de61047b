//! REST endpoint handlers organized by resource.

pub mod supply;
pub mod system;
pub mod tvl;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new().merge(tvl::api_routes())
}

/// Composes the plain-text routes served at the root level.
pub fn root_routes() -> Router<AppState> {
    Router::new()
        .merge(tvl::routes())
        .merge(supply::routes())
        .merge(system::routes())
}
