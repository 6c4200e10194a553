//! The REST response envelope.
//!
//! Every endpoint answers `{ success, data?, message? }`: `data` carries the payload on
//! success, `message` carries a caller-facing explanation on failure (or a confirmation,
//! for operations with nothing to return).

use docsys_core::model::Prescription;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    PrescriptionRes = ApiResponse<Prescription>,
    PrescriptionListRes = ApiResponse<Vec<Prescription>>,
    AckRes = ApiResponse<String>
)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying a payload.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// A successful response with only a confirmation message.
    pub fn confirmation(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    /// A failed response with a caller-facing message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}
