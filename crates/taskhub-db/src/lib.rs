//! # Taskhub DB
//!
//! Persistence collaborators for the Taskhub API.
//!
//! The API only talks to the [`CredentialStore`] and [`TaskStore`] traits.
//! Two providers implement both:
//!
//! - [`MemoryStore`]: seeded in-process store, used when `DATABASE_URL` is unset
//! - [`PgStore`]: PostgreSQL via SQLx, with embedded migrations
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use taskhub_db::{MemoryStore, PgStore};
//!
//! let store = match &config.url {
//!     Some(url) => Arc::new(PgStore::connect(url, &config).await?),
//!     None => Arc::new(MemoryStore::seeded()),
//! };
//! ```

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{CredentialStore, NewTask, StoreError, TaskStore};
