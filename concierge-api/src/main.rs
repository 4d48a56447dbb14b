//! Concierge Server Entry Point
//!
//! Bootstraps configuration, the PostgreSQL pool, and the Axum HTTP server.

use axum::Router;
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use concierge_api::{
    create_app_router, ApiError, ApiResult, AppConfig, AppState, DbClient, DbConfig, ErrorCode,
};
use concierge_core::TokenVerifier;

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    if config.uses_dev_secret() {
        tracing::warn!("Running with the development placeholder secret");
    }

    let db_config = DbConfig::from_env();
    let db = DbClient::from_config(&db_config)?;

    // Fail fast: a store that is unreachable at boot terminates the process
    // instead of serving requests that can only fail.
    db.health_check().await?;

    let verifier = TokenVerifier::new(config.secret_key.expose_secret());
    let state = AppState::new(db, verifier);

    let app: Router = create_app_router(state, &config);

    let addr = config.bind_addr()?;
    tracing::info!(%addr, "Starting Concierge server");

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        ApiError::new(
            ErrorCode::InternalError,
            format!("Failed to bind {}: {}", addr, e),
        )
    })?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| {
                ApiError::new(ErrorCode::InternalError, format!("Server error: {}", e))
            })?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
