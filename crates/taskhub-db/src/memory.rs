//! In-process store used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use taskhub_models::{Account, TaskItem, roles};
use tokio::sync::RwLock;

use crate::store::{CredentialStore, NewTask, StoreError, TaskStore};

#[derive(Debug)]
struct TaskTable {
    next_id: i32,
    rows: BTreeMap<i32, TaskItem>,
}

/// Accounts are fixed at construction; tasks live behind a lock.
#[derive(Debug)]
pub struct MemoryStore {
    accounts: Vec<Account>,
    tasks: RwLock<TaskTable>,
}

impl MemoryStore {
    pub fn new(accounts: Vec<Account>, tasks: Vec<TaskItem>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let rows = tasks.into_iter().map(|t| (t.id, t)).collect();

        Self {
            accounts,
            tasks: RwLock::new(TaskTable { next_id, rows }),
        }
    }

    /// Store pre-populated with the default accounts and sample tasks.
    pub fn seeded() -> Self {
        Self::new(seed_accounts(), seed_tasks())
    }
}

pub fn seed_accounts() -> Vec<Account> {
    vec![
        Account::new(1, "admin", "admin123", roles::ADMIN),
        Account::new(2, "user1", "user123", roles::USER),
    ]
}

pub fn seed_tasks() -> Vec<TaskItem> {
    vec![
        TaskItem {
            id: 1,
            title: Some("Complete API Documentation".to_string()),
            description: Some("Write all API documentation for the project".to_string()),
            user_id: Some(1),
        },
        TaskItem {
            id: 2,
            title: Some("Implement Authentication".to_string()),
            description: Some("Finish JWT authentication implementation".to_string()),
            user_id: Some(2),
        },
    ]
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let wanted = username.to_lowercase();
        Ok(self
            .accounts
            .iter()
            .find(|a| a.username.to_lowercase() == wanted)
            .cloned())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create(&self, task: NewTask) -> Result<TaskItem, StoreError> {
        let mut table = self.tasks.write().await;
        let id = table.next_id;
        table.next_id += 1;

        let item = TaskItem {
            id,
            title: Some(task.title),
            description: task.description,
            user_id: task.user_id,
        };
        table.rows.insert(id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<TaskItem>, StoreError> {
        Ok(self.tasks.read().await.rows.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: i32) -> Result<Vec<TaskItem>, StoreError> {
        Ok(self
            .tasks
            .read()
            .await
            .rows
            .values()
            .filter(|t| t.user_id == Some(user_id))
            .cloned()
            .collect())
    }
}
