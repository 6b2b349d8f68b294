//! JSON response envelope
//!
//! Every response carries `success`; the remaining fields are present only
//! when they apply.

use crate::error::{Error, ErrorCode};
use relief_geo::Coordinate;
use serde::{Deserialize, Serialize};

/// Envelope returned by every operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Payload of a successful operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Number of items in `data`, for listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Query origin, for distance-sorted listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_location: Option<Coordinate>,
    /// Confirmation text for mutations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Failure description safe to show the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Error code of a failed operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            user_location: None,
            message: None,
            error: None,
            code: None,
        }
    }

    /// Attach the number of returned items
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Echo the query origin back to the caller
    pub fn with_user_location(mut self, origin: Coordinate) -> Self {
        self.user_location = Some(origin);
        self
    }

    /// Attach a human-readable message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// A failed response.
    ///
    /// Client and configuration errors echo their message; anything else is
    /// reported with `fallback` so store internals do not leak to callers.
    pub fn from_error(err: &Error, fallback: &str) -> Self {
        let error = if err.is_client_error() || err.is_config_error() {
            err.message.clone()
        } else {
            fallback.to_string()
        };
        Self {
            success: false,
            data: None,
            count: None,
            user_location: None,
            message: None,
            error: Some(error),
            code: Some(err.code),
        }
    }
}

impl ApiResponse<()> {
    /// A successful response with only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            count: None,
            user_location: None,
            message: Some(message.into()),
            error: None,
            code: None,
        }
    }
}
