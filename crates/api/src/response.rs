//! Shared response envelope types for API handlers.
//!
//! Every success body carries `success: true` next to its payload. Use these
//! types instead of ad-hoc `serde_json::json!` values.

use serde::Serialize;
use vitals_core::search::Pagination;

/// Standard `{ "success": true, "data": T }` envelope.
///
/// ```ignore
/// Ok(Json(DataResponse::new(device)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{ "success": true, "data": [..], "pagination": {..} }` for list endpoints.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, pagination: Pagination) -> Self {
        Self {
            success: true,
            data,
            pagination,
        }
    }
}

/// `{ "success": true, "message": "..", "data": T }`, returned by deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> MessageResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}
