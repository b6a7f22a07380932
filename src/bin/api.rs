//! Visitcost API Server
//!
//! Run with: cargo run --bin visitcost-api
//!
//! # Configuration
//!
//! Config file locations (first found wins):
//! - `$CONFIG_DIR/visitcost/config.toml`
//! - `/etc/visitcost/config.toml`
//! - `./config.toml`
//!
//! Environment variables:
//! - `VISITCOST_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `VISITCOST_API_PORT`: Port to listen on (default: 8090)
//! - `VISITCOST_SCALE_ANCHOR`: Chart scale anchor interval, 0 disables (default: 20)
//! - `VISITCOST_MAX_POINTS`: Largest sweep per request (default: 100000)
//! - `VISITCOST_LOG_LEVEL`, `VISITCOST_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Log filter (overrides the level above)

use visitcost::api::{serve, AppState};
use visitcost::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    visitcost::logging::init(&config.logging, "tower_http=debug");

    tracing::info!("Starting Visitcost API server v{}", env!("CARGO_PKG_VERSION"));

    let calculator = config.calculator.calculator();
    let defaults = calculator.defaults();
    tracing::info!(
        total_days = defaults.sweep.total_days,
        max_interval = defaults.sweep.max_interval,
        step_days = defaults.sweep.step_days,
        base_months = defaults.sweep.base_months,
        scale_anchor = ?calculator.scale_anchor_days(),
        max_points = calculator.max_points(),
        "Calculator defaults"
    );

    let state = AppState::new(calculator, config.api.clone());

    tracing::info!("Starting server on {}:{}", config.api.host, config.api.port);
    serve(state, &config.api).await?;

    tracing::info!("Visitcost API server stopped");
    Ok(())
}
