//! Domain data types for the assistance-request intake.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by domain-level validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    /// One or more required intake fields is absent or empty.
    #[error("missing required fields: name, email, issue_description")]
    MissingFields,
}

/// A support request as submitted by the client.
///
/// All three fields are required to be non-empty. The email address is not
/// checked for RFC shape server-side; the client does the cosmetic check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AssistanceRequest {
    pub name: String,
    pub email: String,
    pub issue_description: String,
}

impl AssistanceRequest {
    /// Check that every required field carries a non-whitespace value.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.issue_description.trim().is_empty()
        {
            return Err(DomainError::MissingFields);
        }
        Ok(())
    }
}

/// Identifier and server-assigned timestamp returned after a successful
/// intake insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Receipt {
    pub id: i32,
    pub submitted_at: DateTime<Utc>,
}
