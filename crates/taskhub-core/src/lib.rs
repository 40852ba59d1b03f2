//! # Taskhub Core
//!
//! Core types shared by every Taskhub crate.
//!
//! - [`errors`]: the application error type and the JSON error envelope
//!
//! # Example
//!
//! ```ignore
//! use taskhub_core::AppError;
//!
//! fn find(id: i32) -> Result<Task, AppError> {
//!     store.get(id).ok_or_else(|| AppError::not_found("Task not found"))
//! }
//! ```

pub mod errors;

pub use errors::{AppError, ErrorEnvelope, ErrorKind};
