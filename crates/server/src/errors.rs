use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use service::listing::ListingError;
use service::users::errors::UserError;

/// JSON error body returned by every handler.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub detail: String,
    pub code: u16,
}

#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, detail: impl Into<String>, code: u16) -> Self {
        Self { status, body: ErrorBody { error, detail: detail.into(), code } }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, code = self.body.code, detail = %self.body.detail, "request failed");
        } else {
            warn!(status = %self.status, code = self.body.code, detail = %self.body.detail, "request rejected");
        }
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ListingError> for JsonApiError {
    fn from(e: ListingError) -> Self {
        let code = e.code();
        match e {
            ListingError::Unauthenticated(_) => Self::new(StatusCode::UNAUTHORIZED, "unauthenticated", e.to_string(), code),
            ListingError::NotFound => Self::new(StatusCode::NOT_FOUND, "not_found", e.to_string(), code),
            ListingError::Conflict => Self::new(StatusCode::CONFLICT, "conflict", e.to_string(), code),
            ListingError::Store(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", e.to_string(), code),
        }
    }
}

impl From<UserError> for JsonApiError {
    fn from(e: UserError) -> Self {
        let code = e.code();
        match e {
            UserError::Unauthenticated(_) => Self::new(StatusCode::UNAUTHORIZED, "unauthenticated", e.to_string(), code),
            UserError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, "validation", e.to_string(), code),
            UserError::Repository(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", e.to_string(), code),
        }
    }
}

/// Request-shape failures (bad query, path or body) keep axum's status but
/// use the JSON error body.
const INVALID_REQUEST_CODE: u16 = 1001;

impl From<QueryRejection> for JsonApiError {
    fn from(r: QueryRejection) -> Self {
        Self::new(r.status(), "invalid_request", r.body_text(), INVALID_REQUEST_CODE)
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self {
        Self::new(r.status(), "invalid_request", r.body_text(), INVALID_REQUEST_CODE)
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        Self::new(r.status(), "invalid_request", r.body_text(), INVALID_REQUEST_CODE)
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
