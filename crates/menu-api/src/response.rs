//! Response envelope shared by every menu route

use chrono::Utc;
use serde::Serialize;

use menu_core::domain::StatusResponse;
use menu_core::error::ErrorKind;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    pub timestamp: String,
}

/// `code` is one of the stable [`ErrorKind`] names.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code: kind.as_str(),
                message: message.into(),
            }),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl ApiResponse<StatusResponse> {
    /// Outcome of a delete. `success` follows the status flag.
    pub fn deleted(status: StatusResponse) -> Self {
        Self {
            success: status.status,
            data: Some(status),
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
