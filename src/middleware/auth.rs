use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use taskhub_auth::{ClaimsContext, TokenValidator};
use taskhub_core::AppError;

use crate::state::AppState;

/// Validates the bearer token in `headers`.
///
/// Fails closed: an absent or malformed `Authorization` header is treated
/// the same as a bad token.
pub fn authenticate(
    headers: &HeaderMap,
    validator: &TokenValidator,
) -> Result<ClaimsContext, AppError> {
    let Authorization(bearer) = headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| {
            AppError::unauthorized().with_source(anyhow!("missing or malformed bearer token"))
        })?;

    validator.validate(bearer.token())
}

/// Route layer for identity-required routes. On success the verified
/// [`ClaimsContext`] is stored in the request extensions; on failure the
/// inner service is never called.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = authenticate(req.headers(), &state.token_validator)?;
    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}

/// Extractor for the caller's verified identity.
///
/// Reuses the context placed by [`require_auth`] when present, otherwise
/// validates the header itself.
#[derive(Debug, Clone)]
pub struct AuthUser(pub ClaimsContext);

impl AuthUser {
    pub fn account_id(&self) -> i32 {
        self.0.account_id()
    }

    pub fn username(&self) -> &str {
        self.0.username()
    }

    pub fn role(&self) -> &str {
        self.0.role()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<ClaimsContext>() {
            return Ok(AuthUser(ctx.clone()));
        }

        authenticate(&parts.headers, &state.token_validator).map(AuthUser)
    }
}
