use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::instrument;

use taskhub_core::{AppError, ErrorEnvelope};
use taskhub_models::{ClaimEntry, CreateTaskDto, DebugAuthResponse, TaskItem};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{PathParam, ValidatedJson};

use super::service::TaskService;

#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskDto,
    responses(
        (status = 201, description = "Task created", body = TaskItem),
        (status = 400, description = "Title missing or malformed body", body = ErrorEnvelope),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
        (status = 403, description = "Forbidden - requires the Admin role", body = ErrorEnvelope)
    ),
    tag = "Tasks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_task(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTaskDto>,
) -> Result<impl IntoResponse, AppError> {
    let task = TaskService::create_task(state.tasks.as_ref(), dto).await?;
    let location = format!("/api/tasks/{}", task.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(task)))
}

#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task details", body = TaskItem),
        (status = 400, description = "Id is not an integer", body = ErrorEnvelope),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
        (status = 404, description = "Task not found", body = ErrorEnvelope)
    ),
    tag = "Tasks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_task_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<TaskItem>, AppError> {
    let task = TaskService::get_task_by_id(state.tasks.as_ref(), id).await?;
    Ok(Json(task))
}

#[utoipa::path(
    get,
    path = "/api/tasks/user/{user_id}",
    params(
        ("user_id" = i32, Path, description = "Owning account ID")
    ),
    responses(
        (status = 200, description = "Tasks assigned to the account", body = Vec<TaskItem>),
        (status = 400, description = "Id is not an integer", body = ErrorEnvelope),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope)
    ),
    tag = "Tasks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_tasks_by_user(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<i32>,
) -> Result<Json<Vec<TaskItem>>, AppError> {
    let tasks = TaskService::get_tasks_by_user(state.tasks.as_ref(), user_id).await?;
    Ok(Json(tasks))
}

/// Echo the caller's verified identity and every claim in its token
#[utoipa::path(
    get,
    path = "/api/tasks/debug-auth",
    responses(
        (status = 200, description = "Caller identity", body = DebugAuthResponse),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope)
    ),
    tag = "Tasks",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all, fields(account_id = auth_user.account_id()))]
pub async fn debug_auth(auth_user: AuthUser) -> Json<DebugAuthResponse> {
    let all_claims = auth_user
        .0
        .claims()
        .entries()
        .into_iter()
        .map(|(claim_type, value)| ClaimEntry {
            claim_type: claim_type.to_string(),
            value,
        })
        .collect();

    Json(DebugAuthResponse {
        username: auth_user.username().to_string(),
        role: auth_user.role().to_string(),
        all_claims,
    })
}
