//! OpenAPI documentation generated with utoipa.

use utoipa::OpenApi;

use crate::api::dto::FarmValuationDto;
use crate::api::handlers;
use crate::api::handlers::system::HealthResponse;
use crate::error::ErrorResponse;

/// OpenAPI document for every gateway route.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Farm TVL Gateway API",
        description = "Total value locked, farm valuations and token supply computed from batched on-chain reads."
    ),
    tags(
        (name = "TVL", description = "Total value locked and farm valuations"),
        (name = "Supply", description = "Project token supply"),
        (name = "System", description = "Health check")
    ),
    paths(
        handlers::tvl::get_tvl,
        handlers::tvl::list_farms,
        handlers::supply::get_circulating_supply,
        handlers::supply::get_total_supply,
        handlers::system::health_handler,
    ),
    components(schemas(FarmValuationDto, HealthResponse, ErrorResponse))
)]
pub struct ApiDoc;

/// Returns the OpenAPI JSON specification.
#[must_use]
pub fn openapi_json() -> String {
    ApiDoc::openapi().to_pretty_json().unwrap_or_default()
}
