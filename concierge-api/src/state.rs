//! Shared application state for the Axum router.

use std::sync::Arc;

use axum::extract::FromRef;
use concierge_core::TokenVerifier;

use crate::db::DbClient;

/// Application-wide state shared across all routes.
///
/// The store handle and verifier are injected here rather than living in
/// process-wide globals, so tests can assemble a state of their own.
#[derive(Clone)]
pub struct AppState {
    pub db: DbClient,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(db: DbClient, verifier: TokenVerifier) -> Self {
        Self {
            db,
            verifier: Arc::new(verifier),
        }
    }
}

impl FromRef<AppState> for DbClient {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Arc<TokenVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}
