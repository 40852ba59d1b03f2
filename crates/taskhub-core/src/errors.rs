//! Application error type and its conversion into the JSON error envelope.
//!
//! Every request stage (extractors, middleware, handlers, services) returns
//! `Result<T, AppError>`. The [`IntoResponse`] impl below is the only place
//! an error becomes an HTTP response, so every failure reaches the caller as
//! the same `{ "StatusCode": <int>, "Message": <string> }` body.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized access";
pub const FORBIDDEN_MESSAGE: &str = "Forbidden access";
pub const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

/// Failure classification. Determines the status code and whether the
/// message is shown to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input is malformed or breaks a business rule.
    Validation,
    /// Credentials or token are missing or invalid.
    Authentication,
    /// Valid identity without the required role.
    Authorization,
    NotFound,
    /// Route exists but not for this HTTP method.
    MethodNotAllowed,
    /// Anything unexpected. Detail is logged, never returned.
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Uniform error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorEnvelope {
    #[schema(example = 401)]
    pub status_code: u16,
    #[schema(example = "Unauthorized access")]
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
        }
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    /// Message placed in the envelope.
    pub message: String,
    /// Internal detail, logged only.
    pub source: Option<Error>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source<E>(mut self, err: E) -> Self
    where
        E: Into<Error>,
    {
        self.source = Some(err.into());
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Token missing or rejected.
    pub fn unauthorized() -> Self {
        Self::authentication(UNAUTHORIZED_MESSAGE)
    }

    pub fn forbidden() -> Self {
        Self::new(ErrorKind::Authorization, FORBIDDEN_MESSAGE)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, INTERNAL_MESSAGE).with_source(err)
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// The envelope sent to the caller. Internal errors always carry the
    /// generic message regardless of what was set.
    pub fn envelope(&self) -> ErrorEnvelope {
        let message = match self.kind {
            ErrorKind::Internal => INTERNAL_MESSAGE,
            _ => self.message.as_str(),
        };
        ErrorEnvelope::new(self.status(), message)
    }

    fn log(&self) {
        let status = self.status().as_u16();
        match (&self.kind, &self.source) {
            (ErrorKind::Internal, Some(source)) => {
                tracing::error!(status, error = ?source, "Unhandled error");
            }
            (ErrorKind::Internal, None) => {
                tracing::error!(status, message = %self.message, "Unhandled error");
            }
            (_, Some(source)) => {
                tracing::warn!(status, message = %self.message, detail = %source, "Request rejected");
            }
            (_, None) => {
                tracing::warn!(status, message = %self.message, "Request rejected");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        self.envelope().into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
