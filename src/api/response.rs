//! JSON response bodies and error-to-status mapping

use axum::{
    BoxError, Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tower::timeout::error::Elapsed;
use tracing::{error, warn};

use crate::BridgeError;
use crate::service::ServiceStats;

/// `{success, data}` on success, `{success, message}` otherwise
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// `GET /health` body
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
    pub served: ServiceStats,
}

impl BridgeError {
    fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::Validation { .. } => StatusCode::BAD_REQUEST,
            BridgeError::EmptyResult { .. } => StatusCode::NOT_FOUND,
            BridgeError::Config { .. }
            | BridgeError::Upstream { .. }
            | BridgeError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        (status, Json(ApiResponse::error(self.user_message()))).into_response()
    }
}

/// Turns errors raised by the middleware stack into JSON bodies
pub async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        warn!("Request exceeded the server timeout");
        return (
            StatusCode::REQUEST_TIMEOUT,
            Json(ApiResponse::error("request timeout")),
        )
            .into_response();
    }

    error!(error = %err, "Unhandled middleware error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error("internal error")),
    )
        .into_response()
}
