//! Token supply handlers.

use axum::Router;
use axum::extract::State;
use axum::routing::get;

use crate::api::envelope::ResponseEnvelope;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /circulating-supply`: Total supply minus the burnt balance.
///
/// # Errors
///
/// Returns [`GatewayError`] if the supply read fails.
#[utoipa::path(
    get,
    path = "/circulating-supply",
    tag = "Supply",
    summary = "Circulating supply",
    description = "Returns the project token's total supply minus the balance held by the burn address, in whole tokens.",
    responses(
        (status = 200, description = "Circulating supply", body = String, content_type = "text/plain",
            headers(("Cache-Control" = String, description = "max-age in seconds")),
            example = json!("800000")),
        (status = 500, description = "Read failure", body = ErrorResponse),
    )
)]
pub async fn get_circulating_supply(
    State(state): State<AppState>,
) -> Result<ResponseEnvelope, GatewayError> {
    let supply = state.supply_service.compute_circulating_supply().await?;
    Ok(ResponseEnvelope::success(supply.to_string()).with_max_age(state.supply_cache_max_age_secs))
}

/// `GET /total-supply`: Total supply of the project token.
///
/// # Errors
///
/// Returns [`GatewayError`] if the supply read fails.
#[utoipa::path(
    get,
    path = "/total-supply",
    tag = "Supply",
    summary = "Total supply",
    description = "Returns the project token's total supply in whole tokens.",
    responses(
        (status = 200, description = "Total supply", body = String, content_type = "text/plain",
            headers(("Cache-Control" = String, description = "max-age in seconds")),
            example = json!("1000000")),
        (status = 500, description = "Read failure", body = ErrorResponse),
    )
)]
pub async fn get_total_supply(
    State(state): State<AppState>,
) -> Result<ResponseEnvelope, GatewayError> {
    let supply = state.supply_service.compute_total_supply().await?;
    Ok(ResponseEnvelope::success(supply.to_string()).with_max_age(state.supply_cache_max_age_secs))
}

/// Supply routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/circulating-supply", get(get_circulating_supply))
        .route("/total-supply", get(get_total_supply))
}
