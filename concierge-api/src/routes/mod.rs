//! HTTP routes for the Concierge service.
//!
//! Two JSON endpoints under /api, public health probes under /health, and a
//! catch-all that serves the single-page client's entry document so deep
//! links into the browser app keep working.

pub mod assistance;
pub mod health;
pub mod verify;

use axum::{
    http::{header, HeaderValue, Method},
    routing::post,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::state::AppState;

#[cfg(feature = "openapi")]
async fn openapi_json() -> impl axum::response::IntoResponse {
    use utoipa::OpenApi;
    axum::Json(crate::openapi::ApiDoc::openapi())
}

/// Build the complete application router.
///
/// # Middleware order (outer to inner)
/// 1. CORS - handles preflight requests
/// 2. Trace - request/response logging
/// 3. Handlers
pub fn create_app_router(state: AppState, config: &AppConfig) -> Router {
    let api = Router::new()
        .route("/verify-hmac", post(verify::verify_hmac))
        .route(
            "/assistance-request",
            post(assistance::submit_assistance_request),
        )
        .with_state(state.clone());

    // Unmatched paths fall through to the client bundle; unknown files
    // resolve to the entry document per single-page-app convention.
    let spa = ServeDir::new(&config.static_dir)
        .not_found_service(ServeFile::new(config.static_dir.join("index.html")));

    let router = Router::new()
        .nest("/api", api)
        .nest("/health", health::create_router(state.db.clone()));

    #[cfg(feature = "openapi")]
    let router = router.route("/openapi.json", axum::routing::get(openapi_json));

    router
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config))
}

/// Build the CORS layer from AppConfig.
///
/// With no configured origins (dev mode) all origins are allowed; otherwise
/// only the configured list is.
fn build_cors_layer(config: &AppConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: allowing all origins (dev mode)");
        cors.allow_origin(Any)
    } else {
        tracing::info!("CORS: allowing origins: {:?}", config.cors_origins);
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
