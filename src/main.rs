//! farm-tvl-gateway server entry point.
//!
//! Loads configuration and the farm registry, then serves the REST API.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use farm_tvl_gateway::api;
use farm_tvl_gateway::app_state::AppState;
use farm_tvl_gateway::chain::{BatchReader, JsonRpcClient, MulticallReader};
use farm_tvl_gateway::config::GatewayConfig;
use farm_tvl_gateway::domain::PoolRegistry;
use farm_tvl_gateway::service::{SupplyService, TvlService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Load configuration
    let config = GatewayConfig::from_env().context("loading configuration")?;
    tracing::info!(
        addr = %config.listen_addr,
        chain_id = config.chain_id,
        "starting farm-tvl-gateway"
    );

    // Build domain layer
    let registry = Arc::new(
        PoolRegistry::load(&config.farms_config, config.chain_id)
            .context("loading farm registry")?,
    );

    // Build chain layer
    let client = Arc::new(JsonRpcClient::new(config.rpc_url.clone()));
    let reader: Arc<dyn BatchReader> =
        Arc::new(MulticallReader::new(client, config.multicall_address));

    // Build service layer
    let tvl_service = Arc::new(TvlService::new(
        Arc::clone(&reader),
        registry,
        config.staking_address,
        config.pricing.clone(),
    ));
    let supply_service = Arc::new(SupplyService::new(
        reader,
        config.token_address,
        config.burn_address,
    ));

    // Build application state
    let app_state = AppState {
        tvl_service,
        supply_service,
        supply_cache_max_age_secs: config.supply_cache_max_age_secs,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Text output by default; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
