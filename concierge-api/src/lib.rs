//! Concierge API - HTTP layer
//!
//! This crate exposes the Concierge portal over HTTP: an HMAC token
//! verification endpoint, an assistance-request intake endpoint, health
//! probes, and the static fallback serving the single-page client.
//!
//! Domain logic (the verifier and intake types) lives in `concierge-core`;
//! this crate wires it to Axum and PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::{DbClient, DbConfig};
pub use error::{ApiError, ApiResult, ErrorBody, ErrorCode};
pub use routes::create_app_router;
pub use state::AppState;
pub use types::{AssistanceRequestBody, SubmitAssistanceResponse, VerifyRequest};
