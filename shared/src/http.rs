//! HTTP helpers shared by the API handlers.

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::Error;

/// Message returned for every internal failure.
pub const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

/// Standard error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, String>>,
}

impl ErrorResponse {
    /// Body sent for faults that must not leak detail to the caller.
    pub fn internal() -> Self {
        Self {
            error: "internal_server_error".to_string(),
            message: INTERNAL_MESSAGE.to_string(),
            details: None,
        }
    }
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        match err {
            Error::Validation { field, message } => Self {
                error: err.kind().to_string(),
                message: err.to_string(),
                details: Some(HashMap::from([(field.clone(), message.clone())])),
            },
            Error::Business(_) | Error::NotFound(_) => Self {
                error: err.kind().to_string(),
                message: err.to_string(),
                details: None,
            },
            _ => Self::internal(),
        }
    }
}

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(data)).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "Internal server error");
        }
        json_response(status, ErrorResponse::from(&self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_body_has_details() {
        let body = ErrorResponse::from(&Error::validation("date", "format must be YYYY-MM-DD"));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "validation_error");
        assert_eq!(json["details"]["date"], "format must be YYYY-MM-DD");
    }

    #[test]
    fn test_internal_body_hides_cause() {
        let body = ErrorResponse::from(&Error::Internal("pool exhausted at 10.0.0.3".into()));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "internal_server_error");
        assert_eq!(json["message"], INTERNAL_MESSAGE);
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_status_mapping() {
        let response = Error::Business("down".into()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let response = Error::NotFound("gone".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = Error::validation("user_id", "can't be empty").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
