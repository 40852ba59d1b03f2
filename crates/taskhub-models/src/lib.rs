//! # Taskhub Models
//!
//! Domain models and DTOs for the Taskhub API.
//!
//! - [`accounts`]: stored accounts and the public account summary
//! - [`auth`]: login request/response
//! - [`tasks`]: task records and task request bodies
//!
//! JSON bodies use PascalCase keys. Request bodies also accept camelCase.

pub mod accounts;
pub mod auth;
pub mod serde;
pub mod tasks;

pub use accounts::{Account, AccountSummary, roles};
pub use auth::{LoginRequest, LoginResponse};
pub use tasks::{ClaimEntry, CreateTaskDto, DebugAuthResponse, TaskItem};
