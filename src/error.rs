// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Activity API error: {0}")]
    ActivityApi(String),

    #[error("Name resolution error: {0}")]
    NamesApi(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the error came from an upstream API rather than from us.
    pub fn is_upstream(&self) -> bool {
        matches!(self, AppError::ActivityApi(_) | AppError::NamesApi(_))
    }

    /// HTTP status and machine-readable error code.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::ActivityApi(_) => (StatusCode::BAD_GATEWAY, "activity_api_error"),
            AppError::NamesApi(_) => (StatusCode::BAD_GATEWAY, "names_api_error"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Detail safe to show to clients. Internal errors are only logged.
    pub fn details(&self) -> Option<String> {
        match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::ActivityApi(msg)
            | AppError::NamesApi(msg) => Some(msg.clone()),
            AppError::Internal(_) => None,
        }
    }

    /// Log upstream and internal failures.
    pub fn log(&self) {
        match self {
            AppError::ActivityApi(msg) => tracing::warn!(error = %msg, "Activity API error"),
            AppError::NamesApi(msg) => tracing::warn!(error = %msg, "Name resolution error"),
            AppError::Internal(err) => tracing::error!(error = %err, "Internal server error"),
            AppError::NotFound(_) | AppError::BadRequest(_) => {}
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let (status, error) = self.status_and_code();

        let body = ErrorResponse {
            error: error.to_string(),
            details: self.details(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
