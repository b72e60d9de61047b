//! TVL handlers: aggregated total and per-farm valuations.

use axum::Router;
use axum::extract::State;
use axum::routing::get;

use crate::api::dto::FarmValuationDto;
use crate::api::envelope::ResponseEnvelope;
use crate::app_state::AppState;
use crate::domain::tvl::format_tvl;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /tvl`: Total value locked across every farm.
///
/// # Errors
///
/// Returns [`GatewayError`] if any pool read or valuation fails.
#[utoipa::path(
    get,
    path = "/tvl",
    tag = "TVL",
    summary = "Total value locked",
    description = "Values every configured farm from fresh on-chain reads and returns the total in stable quote units, with two fractional digits.",
    responses(
        (status = 200, description = "Total value locked", body = String, content_type = "text/plain", example = json!("300500.00")),
        (status = 500, description = "Read or valuation failure", body = ErrorResponse),
    )
)]
pub async fn get_tvl(State(state): State<AppState>) -> Result<ResponseEnvelope, GatewayError> {
    let total = state.tvl_service.compute_tvl().await?;
    Ok(ResponseEnvelope::success(format_tvl(total)))
}

/// `GET /farms`: Per-farm valuations in registry order.
///
/// # Errors
///
/// Returns [`GatewayError`] if any pool read or valuation fails.
#[utoipa::path(
    get,
    path = "/api/v1/farms",
    tag = "TVL",
    summary = "List farm valuations",
    description = "Returns the staked amount, quote value and price of every configured farm. Undefined values are null.",
    responses(
        (status = 200, description = "Farm valuations", body = Vec<FarmValuationDto>),
        (status = 500, description = "Read or valuation failure", body = ErrorResponse),
    )
)]
pub async fn list_farms(State(state): State<AppState>) -> Result<ResponseEnvelope, GatewayError> {
    let valuations = state.tvl_service.value_farms().await?;
    let farms: Vec<FarmValuationDto> = valuations.iter().map(FarmValuationDto::from).collect();
    ResponseEnvelope::json(&farms)
}

/// Root-level TVL route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/tvl", get(get_tvl))
}

/// Farm routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/farms", get(list_farms))
}
