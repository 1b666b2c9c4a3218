//! Error types for the assembler, configuration and HTTP layer.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::constants::{EMPTY_IDEA_MESSAGE, UNKNOWN_MODE_MESSAGE};

/// Caller mistakes. These are reported as ordinary `status: "error"` responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Idea missing or blank after trimming.
    #[error("{}", EMPTY_IDEA_MESSAGE)]
    EmptyIdea,

    /// Mode other than `start` or `complete`.
    #[error("{}", UNKNOWN_MODE_MESSAGE)]
    UnknownMode { mode: String },
}

/// Failures inside the assembler itself, never caused by input.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Invalid service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port '{0}'")]
    InvalidPort(String),

    #[error("Invalid bind address '{0}'")]
    InvalidAddress(String),

    #[error("Unknown question schema '{0}', expected 'classic' or 'extended'")]
    UnknownSchema(String),
}

/// HTTP layer error.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Body was not the JSON shape the endpoint expects.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<AssemblyError> for ServerError {
    fn from(e: AssemblyError) -> Self {
        ServerError::Internal(e.to_string())
    }
}

/// Error response body. Shares the `status` field with normal responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = self.to_string();

        match &self {
            ServerError::Internal(_) => {
                tracing::error!(status = %status, error = %message, "Server error");
            }
            ServerError::BadRequest(_) => {
                tracing::warn!(status = %status, error = %message, "Client error");
            }
        }

        let body = ErrorResponse {
            status: "error",
            message,
        };

        (status, Json(body)).into_response()
    }
}
