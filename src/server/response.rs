//! Response envelope and error-to-status mapping.

use crate::service::ServiceError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};

/// Body of every response: `errorMessage` is null on success, `data` is null
/// on failure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    error_message: Option<String>,
    data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Successful response carrying `data`.
    pub fn data(data: T) -> Self {
        Self {
            error_message: None,
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// Failed response carrying `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            data: None,
        }
    }
}

/// Result type of every handler.
pub type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

/// Wraps a payload in a successful envelope.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(Envelope::data(data)))
}

/// Error returned from a handler.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 with `message`.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Status this error is sent with.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Message placed in `errorMessage`.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::InvalidRequest { .. }
            | ServiceError::IllegalMove { .. }
            | ServiceError::InvalidRange { .. }
            | ServiceError::MoveOutOfRange { .. } => StatusCode::BAD_REQUEST,
            ServiceError::GameNotFound { .. }
            | ServiceError::GameNotInProgress { .. }
            | ServiceError::PlayerNotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::NotYourTurn { .. } => StatusCode::CONFLICT,
            ServiceError::Internal { source } => {
                error!(error = %source, "Store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(status = %self.status, message = %self.message, "Request failed");
        (self.status, Json(Envelope::<()>::error(self.message))).into_response()
    }
}
