//! OpenAPI document for the Concierge API.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Concierge API",
        description = "Token verification and assistance-request intake for the Concierge portal"
    ),
    paths(
        crate::routes::verify::verify_hmac,
        crate::routes::assistance::submit_assistance_request,
        crate::routes::health::ping,
        crate::routes::health::liveness,
        crate::routes::health::readiness,
    ),
    components(schemas(
        crate::types::VerifyRequest,
        crate::types::AssistanceRequestBody,
        crate::types::SubmitAssistanceResponse,
        crate::error::ErrorBody,
        crate::routes::health::HealthResponse,
        crate::routes::health::HealthDetails,
        crate::routes::health::ComponentHealth,
        crate::routes::health::HealthStatus,
        concierge_core::Receipt,
    )),
    tags(
        (name = "Verification", description = "HMAC token verification"),
        (name = "Assistance", description = "Support request intake"),
        (name = "Health", description = "Liveness and readiness probes"),
    )
)]
pub struct ApiDoc;
