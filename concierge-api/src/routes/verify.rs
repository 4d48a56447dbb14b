//! Token verification route.

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::Value as JsonValue;

use concierge_core::TokenError;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::VerifyRequest;

/// POST /api/verify-hmac - verify a client token and return its stored payload
///
/// The token is recomputed server-side over the fixed challenge message and
/// compared as lowercase hex. A mismatch yields 401 with no further detail;
/// the store is only consulted after the tag matches.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/verify-hmac",
    tag = "Verification",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Stored payload for the verified token"),
        (status = 400, description = "Token missing from request", body = crate::error::ErrorBody),
        (status = 401, description = "Token does not match the expected tag", body = crate::error::ErrorBody),
        (status = 404, description = "No record stored for this tag", body = crate::error::ErrorBody),
        (status = 500, description = "Store unavailable or query failed", body = crate::error::ErrorBody),
    ),
))]
pub async fn verify_hmac(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> ApiResult<impl IntoResponse> {
    let token = request.c_number.as_deref().unwrap_or("");

    let tag = state.verifier.verify(token).map_err(|err| match err {
        TokenError::Missing => ApiError::missing_input("c_number is required"),
        TokenError::Mismatch => {
            tracing::warn!("Token verification failed: tag mismatch");
            ApiError::invalid_token()
        }
        TokenError::Hmac => {
            tracing::error!("HMAC initialization failed");
            ApiError::internal_error()
        }
    })?;

    let payload: JsonValue = state
        .db
        .lookup_payload(&tag)
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(payload))
}
