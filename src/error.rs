//! Error types for the traffic statistics API
//!
//! Provides unified error handling using thiserror.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Generic message returned for internal faults; the detail only goes to the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "服务器内部错误";

// == App Error Enum ==
/// Unified error type for the API.
#[derive(Error, Debug)]
pub enum AppError {
    /// Interface name failed validation
    #[error("无效的接口名称")]
    InvalidInterface,

    /// Unknown period code
    #[error("无效的时间周期")]
    InvalidPeriod,

    /// Date parameter is not a valid YYYY-MM-DD date
    #[error("无效的日期格式")]
    InvalidDate,

    /// The external accounting tool failed to spawn, exited non-zero or timed out
    #[error("{0}")]
    Command(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInterface | AppError::InvalidPeriod | AppError::InvalidDate => {
                StatusCode::BAD_REQUEST
            }
            AppError::Command(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Internal(detail) => {
                error!("Internal server error: {}", detail);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Panic Boundary ==
/// Converts a handler panic into the generic internal-error response.
///
/// Installed through `CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(detail).into_response()
}

// == Result Type Alias ==
/// Convenience Result type for the API.
pub type Result<T> = std::result::Result<T, AppError>;
