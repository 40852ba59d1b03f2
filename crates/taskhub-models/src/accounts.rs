//! Account records owned by the credential store.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Role labels known to the API. Checks compare these exactly.
pub mod roles {
    pub const ADMIN: &str = "Admin";
    pub const USER: &str = "User";
}

/// A stored account.
///
/// The password is kept and compared as plaintext. `Debug` is derived for
/// tracing spans, so never log an `Account` at a level that ships to shared
/// sinks.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Account {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub role: String,
}

impl Account {
    pub fn new(
        id: i32,
        username: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password: password.into(),
            role: role.into(),
        }
    }

    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            username: self.username.clone(),
            role: self.role.clone(),
        }
    }
}

/// Public view of an account, as returned by login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct AccountSummary {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "Admin")]
    pub role: String,
}
