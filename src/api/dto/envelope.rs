//! Success envelopes.

use serde::Serialize;
use utoipa::ToSchema;

/// Envelope for responses that carry a payload.
///
/// Reads carry only `data`; creates and updates also carry `message`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Envelope for responses that only confirm an action, such as deletes.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
        }
    }
}
