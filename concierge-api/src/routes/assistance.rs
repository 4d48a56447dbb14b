//! Assistance-request intake route.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use concierge_core::AssistanceRequest;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{AssistanceRequestBody, SubmitAssistanceResponse};

/// Confirmation message returned on a successful intake insert.
pub const SUBMITTED_MESSAGE: &str = "Assistance request submitted successfully.";

/// Validation message for missing fields. The full field list is always
/// reported regardless of which field was absent; clients key on this one
/// fixed string.
const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields: name, email, issue_description";

/// POST /api/assistance-request - append a support request to the intake log
///
/// Two identical submissions produce two distinct rows; the log is
/// append-only and idempotence is deliberately not provided.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/assistance-request",
    tag = "Assistance",
    request_body = AssistanceRequestBody,
    responses(
        (status = 201, description = "Request recorded", body = SubmitAssistanceResponse),
        (status = 400, description = "One or more required fields missing", body = crate::error::ErrorBody),
        (status = 500, description = "Store unavailable or insert failed", body = crate::error::ErrorBody),
    ),
))]
pub async fn submit_assistance_request(
    State(state): State<AppState>,
    Json(body): Json<AssistanceRequestBody>,
) -> ApiResult<impl IntoResponse> {
    let request = AssistanceRequest {
        name: body.name.unwrap_or_default(),
        email: body.email.unwrap_or_default(),
        issue_description: body.issue_description.unwrap_or_default(),
    };

    request
        .validate()
        .map_err(|_| ApiError::missing_input(MISSING_FIELDS_MESSAGE))?;

    let receipt = state.db.submit_assistance_request(&request).await?;

    tracing::info!(request_id = receipt.id, "Assistance request recorded");

    Ok((
        StatusCode::CREATED,
        Json(SubmitAssistanceResponse {
            message: SUBMITTED_MESSAGE.to_string(),
            data: receipt,
        }),
    ))
}
