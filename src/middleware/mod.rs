//! Middleware and extractors for the request pipeline.
//!
//! # Modules
//!
//! - [`auth`]: bearer token validation ([`auth::require_auth`], [`auth::AuthUser`])
//! - [`role`]: role checks ([`role::require_admin`], [`role::authorize`])
//! - [`recover`]: panic and fallback handling
//!
//! # Request Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `require_auth` validates the token and stores the `ClaimsContext`
//! 3. `require_admin` (Admin routes only) compares the role claim
//! 4. Handler runs; any `AppError` becomes the JSON error envelope
//!
//! A failing step returns its `AppError` and the remaining steps never run.

pub mod auth;
pub mod recover;
pub mod role;
