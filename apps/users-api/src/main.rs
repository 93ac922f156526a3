use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);
    observability::init_metrics();

    let state = AppState::new(config);

    if state.config.enable_test_routes {
        info!("Test routes enabled under /test");
    }

    let app = api::app(&state)?;

    info!(
        "Starting {} v{} ({:?})",
        state.config.app.name, state.config.app.version, state.config.environment
    );

    let server = state.config.server.clone();
    create_production_app(app, &server, async move {
        let remaining = state.users.list_users(false).await.map(|u| u.len()).unwrap_or(0);
        info!(users = remaining, "Discarding in-memory user table");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
