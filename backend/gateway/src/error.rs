//! HTTP error responses. Every failure is reported as `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to parse form data")]
    MalformedForm,

    #[error("No image file provided")]
    MissingFile,

    #[error("Image file too large")]
    PayloadTooLarge,

    #[error("Failed to read image file")]
    ReadFailed,

    #[error("Failed to process image")]
    ProcessingFailed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedForm | ApiError::MissingFile => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ReadFailed | ApiError::ProcessingFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
