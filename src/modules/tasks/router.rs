use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::require_admin;
use crate::state::AppState;

use super::controller::{create_task, debug_auth, get_task_by_id, get_tasks_by_user};

/// Routes under `/api/tasks`. Authentication is layered on by the caller;
/// creation additionally requires the Admin role.
pub fn init_tasks_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_task).route_layer(middleware::from_fn(require_admin)),
        )
        .route("/debug-auth", get(debug_auth))
        .route("/user/{user_id}", get(get_tasks_by_user))
        .route("/{id}", get(get_task_by_id))
}
