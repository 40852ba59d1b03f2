//! Task records and request bodies.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::serde::deserialize_null_as_empty;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct TaskItem {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Complete API Documentation")]
    pub title: Option<String>,
    pub description: Option<String>,
    /// Owning account, if assigned
    pub user_id: Option<i32>,
}

/// Body of `POST /api/tasks`. Any `Id` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTaskDto {
    #[serde(
        rename = "Title",
        alias = "title",
        default,
        deserialize_with = "deserialize_null_as_empty"
    )]
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Implement Authentication")]
    pub title: String,
    #[serde(rename = "Description", alias = "description", default)]
    pub description: Option<String>,
    #[serde(rename = "UserId", alias = "userId", default)]
    pub user_id: Option<i32>,
}

/// Debug view of the caller's identity.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct DebugAuthResponse {
    pub username: String,
    pub role: String,
    pub all_claims: Vec<ClaimEntry>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ClaimEntry {
    #[serde(rename = "Type")]
    pub claim_type: String,
    pub value: String,
}
