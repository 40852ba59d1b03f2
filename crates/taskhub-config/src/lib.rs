//! # Taskhub Config
//!
//! Configuration types for the Taskhub API, loaded from environment
//! variables once at startup:
//!
//! - [`jwt`]: token signing key, issuer and audience
//! - [`database`]: optional Postgres connection settings
//! - [`server`]: listen address
//! - [`cors`]: allowed browser origins
//!
//! # Example
//!
//! ```ignore
//! use taskhub_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let database_config = DatabaseConfig::from_env()?;
//! let server_config = ServerConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! ```

use thiserror::Error;

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("JWT key must be at least {required} bytes (256 bits), got {actual}")]
    KeyTooShort { actual: usize, required: usize },

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
