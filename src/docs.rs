use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use taskhub_core::ErrorEnvelope;
use taskhub_models::{
    AccountSummary, ClaimEntry, CreateTaskDto, DebugAuthResponse, LoginRequest, LoginResponse,
    TaskItem,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::tasks::controller::create_task,
        crate::modules::tasks::controller::get_task_by_id,
        crate::modules::tasks::controller::get_tasks_by_user,
        crate::modules::tasks::controller::debug_auth,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            AccountSummary,
            TaskItem,
            CreateTaskDto,
            DebugAuthResponse,
            ClaimEntry,
            ErrorEnvelope,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token issuance"),
        (name = "Tasks", description = "Task endpoints, bearer token required")
    ),
    info(
        title = "Taskhub API",
        version = "0.1.0",
        description = "Task API with JWT bearer authentication and role-based authorization.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes_and_bearer_scheme() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/auth/login",
            "/api/tasks",
            "/api/tasks/{id}",
            "/api/tasks/user/{user_id}",
            "/api/tasks/debug-auth",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }

        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.schemas.contains_key("ErrorEnvelope"));
    }
}
