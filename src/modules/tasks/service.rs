use anyhow::Context;
use tracing::instrument;

use taskhub_core::AppError;
use taskhub_db::{NewTask, TaskStore};
use taskhub_models::{CreateTaskDto, TaskItem};

pub struct TaskService;

impl TaskService {
    #[instrument(skip(store))]
    pub async fn create_task(store: &dyn TaskStore, dto: CreateTaskDto) -> Result<TaskItem, AppError> {
        let task = store
            .create(NewTask {
                title: dto.title,
                description: dto.description,
                user_id: dto.user_id,
            })
            .await
            .context("Failed to create task")?;

        Ok(task)
    }

    #[instrument(skip(store))]
    pub async fn get_task_by_id(store: &dyn TaskStore, id: i32) -> Result<TaskItem, AppError> {
        store
            .find_by_id(id)
            .await
            .context("Failed to fetch task")?
            .ok_or_else(|| AppError::not_found("Task not found"))
    }

    #[instrument(skip(store))]
    pub async fn get_tasks_by_user(
        store: &dyn TaskStore,
        user_id: i32,
    ) -> Result<Vec<TaskItem>, AppError> {
        let tasks = store
            .list_by_user(user_id)
            .await
            .context("Failed to fetch tasks for user")?;

        Ok(tasks)
    }
}
