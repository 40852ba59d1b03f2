//! # Taskhub Auth
//!
//! Stateless bearer-token authentication for the Taskhub API.
//!
//! This crate provides:
//!
//! - [`claims`]: the token payload and the verified [`ClaimsContext`]
//! - [`jwt`]: [`TokenIssuer`] and [`TokenValidator`]
//!
//! A [`ClaimsContext`] can only come out of [`TokenValidator::validate`], so
//! any handler holding one is looking at an identity whose signature,
//! issuer, audience and expiry have all been checked.

pub mod claims;
pub mod jwt;

pub use claims::{Claims, ClaimsContext};
pub use jwt::{TOKEN_LIFETIME_SECS, TokenIssuer, TokenValidator};
