use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

pub const MSG_INVALID_JSON: &str = "Invalid JSON data";
pub const MSG_ROUTE_NOT_FOUND: &str = "Not Found";
pub const MSG_INTERNAL: &str = "Something went wrong!";

/// Every failed request is answered with `{"error": <message>}`.
#[derive(Debug)]
pub struct JsonApiError {
    status: StatusCode,
    message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// The body could not be read or parsed into the expected shape.
    pub fn malformed_body() -> Self {
        Self::new(StatusCode::BAD_REQUEST, MSG_INVALID_JSON)
    }

    pub fn route_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, MSG_ROUTE_NOT_FOUND)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            // details stay in the log; clients get a fixed message
            ServiceError::StorageCorrupt { .. } | ServiceError::Storage(_) => {
                error!(error = %e, "storage failure while handling request");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL)
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage unavailable: {0}")]
    Storage(#[from] ServiceError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
