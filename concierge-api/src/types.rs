//! Request and response types for the HTTP surface.

use serde::{Deserialize, Serialize};

use concierge_core::Receipt;

/// Body of `POST /api/verify-hmac`.
///
/// `c_number` is optional at the deserialization layer so an absent field
/// surfaces as the documented validation error instead of a deserializer
/// reject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VerifyRequest {
    #[serde(default)]
    pub c_number: Option<String>,
}

/// Body of `POST /api/assistance-request`.
///
/// Absent and empty fields are folded into one validation failure, matching
/// the documented contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AssistanceRequestBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub issue_description: Option<String>,
}

/// Body of the `201 Created` intake response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SubmitAssistanceResponse {
    pub message: String,
    pub data: Receipt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_request_tolerates_missing_field() {
        let req: VerifyRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.c_number, None);
    }

    #[test]
    fn verify_request_reads_c_number() {
        let req: VerifyRequest = serde_json::from_str(r#"{"c_number":"abc123"}"#).unwrap();
        assert_eq!(req.c_number.as_deref(), Some("abc123"));
    }

    #[test]
    fn assistance_body_tolerates_partial_input() {
        let body: AssistanceRequestBody =
            serde_json::from_str(r#"{"name":"Alice"}"#).unwrap();
        assert_eq!(body.name.as_deref(), Some("Alice"));
        assert_eq!(body.email, None);
        assert_eq!(body.issue_description, None);
    }

    #[test]
    fn submit_response_shape_matches_contract() {
        let response = SubmitAssistanceResponse {
            message: "Assistance request submitted successfully.".to_string(),
            data: Receipt {
                id: 42,
                submitted_at: "2026-03-04T05:06:07Z".parse().unwrap(),
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["message"], "Assistance request submitted successfully.");
        assert_eq!(json["data"]["id"], 42);
        assert!(json["data"]["submitted_at"].is_string());
    }
}
