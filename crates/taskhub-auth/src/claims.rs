//! Token claim structures.
//!
//! - [`Claims`]: the exact JSON payload carried by an access token
//! - [`ClaimsContext`]: the verified identity handed to request handlers

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use taskhub_core::AppError;
use utoipa::ToSchema;

/// Access token payload.
///
/// `sub` and `name` both carry the username; `nameidentifier` carries the
/// numeric account id as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Unique token identifier
    pub jti: String,
    /// Account id
    pub nameidentifier: String,
    /// Username
    pub name: String,
    /// Role label, e.g. "Admin"
    pub role: String,
    pub iss: String,
    pub aud: String,
    /// Issued-at (Unix seconds, UTC)
    pub iat: i64,
    /// Expiry (Unix seconds, UTC), exclusive
    pub exp: i64,
}

impl Claims {
    /// Claim type/value pairs in payload order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sub", self.sub.clone()),
            ("jti", self.jti.clone()),
            ("nameidentifier", self.nameidentifier.clone()),
            ("name", self.name.clone()),
            ("role", self.role.clone()),
            ("iss", self.iss.clone()),
            ("aud", self.aud.clone()),
            ("iat", self.iat.to_string()),
            ("exp", self.exp.to_string()),
        ]
    }
}

/// Identity established from a verified token.
///
/// There is no public constructor: the only way to obtain one is
/// [`TokenValidator::validate`](crate::TokenValidator::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimsContext {
    account_id: i32,
    username: String,
    role: String,
    claims: Claims,
}

impl ClaimsContext {
    pub(crate) fn from_claims(claims: Claims) -> Result<Self, AppError> {
        let account_id = claims.nameidentifier.parse::<i32>().map_err(|_| {
            AppError::unauthorized().with_source(anyhow!(
                "nameidentifier claim is not an account id: {:?}",
                claims.nameidentifier
            ))
        })?;

        Ok(Self {
            account_id,
            username: claims.name.clone(),
            role: claims.role.clone(),
            claims,
        })
    }

    pub fn account_id(&self) -> i32 {
        self.account_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    /// Full verified payload.
    pub fn claims(&self) -> &Claims {
        &self.claims
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims(nameidentifier: &str) -> Claims {
        Claims {
            sub: "admin".to_string(),
            jti: "8d3c7c0e-3b8c-4d52-9a8e-0a4d6f0b2f11".to_string(),
            nameidentifier: nameidentifier.to_string(),
            name: "admin".to_string(),
            role: "Admin".to_string(),
            iss: "taskhub".to_string(),
            aud: "taskhub-clients".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        }
    }

    #[test]
    fn test_claims_serialize_field_names() {
        let json = serde_json::to_value(sample_claims("1")).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["aud", "exp", "iat", "iss", "jti", "name", "nameidentifier", "role", "sub"]
        );
    }

    #[test]
    fn test_context_from_claims() {
        let ctx = ClaimsContext::from_claims(sample_claims("42")).unwrap();
        assert_eq!(ctx.account_id(), 42);
        assert_eq!(ctx.username(), "admin");
        assert_eq!(ctx.role(), "Admin");
        assert_eq!(ctx.claims().exp, 1_700_003_600);
    }

    #[test]
    fn test_context_rejects_non_numeric_id() {
        let err = ClaimsContext::from_claims(sample_claims("admin")).unwrap_err();
        assert_eq!(err.status().as_u16(), 401);
    }

    #[test]
    fn test_entries_cover_every_claim() {
        let entries = sample_claims("1").entries();
        assert_eq!(entries.len(), 9);
        assert!(entries.contains(&("role", "Admin".to_string())));
        assert!(entries.contains(&("nameidentifier", "1".to_string())));
    }
}
