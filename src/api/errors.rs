use std::backtrace::Backtrace;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::config::Environment;
use crate::domain::repositories::user_repository::RepositoryError;

/// Terminal error type for the request pipeline.
///
/// Every fallible handler returns `Result<_, ApiError>`, so each failed
/// request produces exactly one normalized JSON response. The status is
/// mandatory; errors constructed with 200 are coerced to 500 since a
/// success status on the error path is always a bug upstream.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    stack: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let status = if status == StatusCode::OK {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            status
        };

        // Capture is skipped in production where the trace is never emitted.
        let stack = if Environment::from_env().is_production() {
            None
        } else {
            Some(Backtrace::force_capture().to_string())
        };

        Self {
            status,
            message: message.into(),
            stack,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Response body for the given environment. The `stack` field only ever
    /// appears outside production.
    fn body(&self, environment: Environment) -> Value {
        let mut body = json!({ "message": self.message });
        if !environment.is_production() {
            if let Some(stack) = &self.stack {
                body["stack"] = json!(stack);
            }
        }
        body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = self.body(Environment::from_env());
        (self.status, Json(body)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Duplicate(msg) => Self::bad_request(msg),
            RepositoryError::NotFound(msg) => Self::not_found(msg),
            RepositoryError::Database(msg) => {
                tracing::error!("repository failure: {}", msg);
                Self::internal_server_error(msg)
            }
        }
    }
}
