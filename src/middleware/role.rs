//! Role checks for routes that need more than an authenticated identity.
//!
//! Matching is exact string equality on the token's role claim. There is no
//! hierarchy: an "Admin" requirement is satisfied by "Admin" only.

use anyhow::anyhow;
use axum::{extract::Request, middleware::Next, response::Response};

use taskhub_auth::ClaimsContext;
use taskhub_core::AppError;
use taskhub_models::roles;

/// What a route demands of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    /// Any verified identity.
    Authenticated,
    /// A verified identity whose role claim equals this label.
    Role(&'static str),
}

pub fn authorize(ctx: &ClaimsContext, requirement: RoleRequirement) -> Result<(), AppError> {
    match requirement {
        RoleRequirement::Authenticated => Ok(()),
        RoleRequirement::Role(required) if ctx.role() == required => Ok(()),
        RoleRequirement::Role(required) => Err(AppError::forbidden().with_source(anyhow!(
            "account {} has role {:?}, route requires {:?}",
            ctx.account_id(),
            ctx.role(),
            required
        ))),
    }
}

/// Checks the context left by
/// [`require_auth`](crate::middleware::auth::require_auth). A request that
/// reaches this layer without one is rejected as unauthenticated.
pub async fn require_role(
    req: Request,
    next: Next,
    requirement: RoleRequirement,
) -> Result<Response, AppError> {
    let ctx = req.extensions().get::<ClaimsContext>().ok_or_else(|| {
        AppError::unauthorized().with_source(anyhow!("no verified identity on request"))
    })?;

    authorize(ctx, requirement)?;
    Ok(next.run(req).await)
}

/// Route layer for Admin-only routes.
///
/// ```rust,ignore
/// Router::new().route(
///     "/",
///     post(create_task).route_layer(middleware::from_fn(require_admin)),
/// );
/// ```
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    require_role(req, next, RoleRequirement::Role(roles::ADMIN)).await
}
