//! Storage seams consumed by the API.

use async_trait::async_trait;
use taskhub_models::{Account, TaskItem};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Account lookup used by login.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the account whose username equals `username` ignoring case.
    /// The caller is responsible for trimming.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;
}

/// Fields of a task about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub user_id: Option<i32>,
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores the task and returns it with its assigned id.
    async fn create(&self, task: NewTask) -> Result<TaskItem, StoreError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<TaskItem>, StoreError>;

    async fn list_by_user(&self, user_id: i32) -> Result<Vec<TaskItem>, StoreError>;
}
