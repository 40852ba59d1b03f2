//! Outermost failure boundary: panics, unmatched routes and unsupported
//! methods.

use std::any::Any;

use anyhow::anyhow;
use axum::response::{IntoResponse, Response};
use taskhub_core::{AppError, ErrorKind};

/// Panic handler for `CatchPanicLayer::custom`. The panic payload is
/// logged and the caller gets the generic 500 envelope.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::internal(anyhow!("handler panicked: {}", detail)).into_response()
}

pub async fn not_found() -> AppError {
    AppError::not_found("Resource not found")
}

pub async fn method_not_allowed() -> AppError {
    AppError::new(ErrorKind::MethodNotAllowed, "Method not allowed")
}
