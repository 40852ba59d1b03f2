//! Postgres-backed store.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use taskhub_config::DatabaseConfig;
use taskhub_models::{Account, TaskItem};

use crate::store::{CredentialStore, NewTask, StoreError, TaskStore};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `url` with the pool size from `config`.
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Applies the embedded schema and seed migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, password, role FROM users WHERE LOWER(username) = LOWER($1) LIMIT 1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn create(&self, task: NewTask) -> Result<TaskItem, StoreError> {
        let item = sqlx::query_as::<_, TaskItem>(
            "INSERT INTO tasks (title, description, user_id)
             VALUES ($1, $2, $3)
             RETURNING id, title, description, user_id",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<TaskItem>, StoreError> {
        let item = sqlx::query_as::<_, TaskItem>(
            "SELECT id, title, description, user_id FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn list_by_user(&self, user_id: i32) -> Result<Vec<TaskItem>, StoreError> {
        let items = sqlx::query_as::<_, TaskItem>(
            "SELECT id, title, description, user_id FROM tasks WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
