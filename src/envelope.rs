//! The uniform `{success, message, ...}` response body of the contact endpoint.
//!
//! Shared by the HTTP handler (which builds it) and the wizard's transport
//! (which decodes it).

use serde::{Deserialize, Serialize};

use crate::lead::{FieldError, LeadSummary};

pub const ACCEPTED_MESSAGE: &str = "Request submitted successfully";
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<LeadSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl Envelope {
    pub fn accepted(summary: LeadSummary) -> Self {
        Self {
            success: true,
            message: ACCEPTED_MESSAGE.to_string(),
            summary: Some(summary),
            errors: None,
        }
    }

    pub fn invalid(errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: VALIDATION_FAILED_MESSAGE.to_string(),
            summary: None,
            errors: Some(errors),
        }
    }

    /// Generic failure. Carries no detail about what went wrong.
    pub fn internal() -> Self {
        Self {
            success: false,
            message: INTERNAL_ERROR_MESSAGE.to_string(),
            summary: None,
            errors: None,
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        self.errors.as_deref().unwrap_or_default()
    }
}
