//! Login request and response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::accounts::AccountSummary;
use crate::serde::deserialize_null_as_empty;

/// Submitted credentials.
///
/// Missing fields deserialize as empty strings so the credential check can
/// report them with its own messages.
#[derive(Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(
        rename = "Username",
        alias = "username",
        default,
        deserialize_with = "deserialize_null_as_empty"
    )]
    #[schema(example = "admin")]
    pub username: String,
    #[serde(
        rename = "Password",
        alias = "password",
        default,
        deserialize_with = "deserialize_null_as_empty"
    )]
    #[schema(example = "admin123")]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: AccountSummary,
}
