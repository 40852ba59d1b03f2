//! Access token issuance and validation.
//!
//! Both halves are built once from a [`JwtConfig`] and shared read-only
//! across requests. Tokens are HS256 JWTs that expire one hour after
//! issuance. Validation is purely computational: signature, algorithm,
//! issuer, audience and expiry are checked with zero clock leeway, and no
//! store is consulted.
//!
//! # Example
//!
//! ```ignore
//! use taskhub_auth::{TokenIssuer, TokenValidator};
//! use taskhub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let issuer = TokenIssuer::new(&config);
//! let validator = TokenValidator::new(&config);
//!
//! let token = issuer.issue(1, "admin", "Admin")?;
//! let ctx = validator.validate(&token)?;
//! assert_eq!(ctx.role(), "Admin");
//! ```

use std::fmt;

use anyhow::anyhow;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use taskhub_config::JwtConfig;
use taskhub_core::AppError;

use crate::claims::{Claims, ClaimsContext};

/// Access token lifetime in seconds.
pub const TOKEN_LIFETIME_SECS: i64 = 3600;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Signs access tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: String,
    audience: String,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.key.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }

    /// Issues a token for the account, valid for [`TOKEN_LIFETIME_SECS`].
    pub fn issue(&self, account_id: i32, username: &str, role: &str) -> Result<String, AppError> {
        self.issue_at(account_id, username, role, Utc::now())
    }

    /// Same as [`issue`](Self::issue) with an explicit issuance instant.
    pub fn issue_at(
        &self,
        account_id: i32,
        username: &str,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let expires_at = now + Duration::seconds(TOKEN_LIFETIME_SECS);

        let claims = Claims {
            sub: username.to_string(),
            jti: Uuid::new_v4().to_string(),
            nameidentifier: account_id.to_string(),
            name: username.to_string(),
            role: role.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key).map_err(AppError::internal)
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

/// Verifies inbound access tokens.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = 0;
        // Expiry is checked in `validate_at` so the instant can be supplied.
        validation.validate_exp = false;

        Self {
            decoding_key: DecodingKey::from_secret(config.key.as_bytes()),
            validation,
        }
    }

    pub fn validate(&self, token: &str) -> Result<ClaimsContext, AppError> {
        self.validate_at(token, Utc::now())
    }

    /// Validates `token` as of `now`. A token is rejected from its `exp`
    /// second onwards.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<ClaimsContext, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::unauthorized().with_source(e))?;

        if now.timestamp() >= data.claims.exp {
            return Err(AppError::unauthorized()
                .with_source(anyhow!("token expired at {}", data.claims.exp)));
        }

        ClaimsContext::from_claims(data.claims)
    }
}

impl fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenValidator")
            .field("issuer", &self.validation.iss)
            .field("audience", &self.validation.aud)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskhub_core::ErrorKind;

    const KEY: &str = "test-secret-key-at-least-32-characters-long";

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig::new(KEY, "taskhub", "taskhub-clients").unwrap()
    }

    fn pair(config: &JwtConfig) -> (TokenIssuer, TokenValidator) {
        (TokenIssuer::new(config), TokenValidator::new(config))
    }

    #[test]
    fn test_issue_and_validate_admin() {
        let (issuer, validator) = pair(&get_test_jwt_config());

        let token = issuer.issue(1, "admin", "Admin").unwrap();
        let ctx = validator.validate(&token).unwrap();

        assert_eq!(ctx.account_id(), 1);
        assert_eq!(ctx.username(), "admin");
        assert_eq!(ctx.role(), "Admin");
        assert_eq!(ctx.claims().sub, "admin");
        assert_eq!(ctx.claims().iss, "taskhub");
        assert_eq!(ctx.claims().aud, "taskhub-clients");
    }

    #[test]
    fn test_expiry_is_one_hour_after_issuance() {
        let (issuer, validator) = pair(&get_test_jwt_config());
        let now = Utc::now();

        let token = issuer.issue_at(2, "user1", "User", now).unwrap();
        let ctx = validator.validate_at(&token, now).unwrap();

        assert_eq!(ctx.claims().iat, now.timestamp());
        assert_eq!(ctx.claims().exp, now.timestamp() + TOKEN_LIFETIME_SECS);
    }

    #[test]
    fn test_token_rejected_at_exact_expiry() {
        let (issuer, validator) = pair(&get_test_jwt_config());
        let issued_at = Utc::now();
        let token = issuer.issue_at(1, "admin", "Admin", issued_at).unwrap();

        let last_valid = issued_at + Duration::seconds(TOKEN_LIFETIME_SECS - 1);
        assert!(validator.validate_at(&token, last_valid).is_ok());

        let expiry = issued_at + Duration::seconds(TOKEN_LIFETIME_SECS);
        let err = validator.validate_at(&token, expiry).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Unauthorized access");
    }

    #[test]
    fn test_expired_token_rejected_by_wall_clock() {
        let (issuer, validator) = pair(&get_test_jwt_config());
        let long_ago = Utc::now() - Duration::seconds(TOKEN_LIFETIME_SECS + 1);

        let token = issuer.issue_at(1, "admin", "Admin", long_ago).unwrap();
        assert!(validator.validate(&token).is_err());
    }

    #[test]
    fn test_verify_token_invalid() {
        let validator = TokenValidator::new(&get_test_jwt_config());
        assert!(validator.validate("invalid-token").is_err());
        assert!(validator.validate("invalid.token.here").is_err());
        assert!(validator.validate("").is_err());
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let issuer = TokenIssuer::new(&get_test_jwt_config());
        let token = issuer.issue(1, "admin", "Admin").unwrap();

        let wrong_config = JwtConfig::new(
            "different-secret-key-at-least-32-characters",
            "taskhub",
            "taskhub-clients",
        )
        .unwrap();
        let validator = TokenValidator::new(&wrong_config);

        assert!(validator.validate(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let issuer = TokenIssuer::new(&JwtConfig::new(KEY, "someone-else", "taskhub-clients").unwrap());
        let validator = TokenValidator::new(&get_test_jwt_config());

        let token = issuer.issue(1, "admin", "Admin").unwrap();
        assert!(validator.validate(&token).is_err());
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let issuer = TokenIssuer::new(&JwtConfig::new(KEY, "taskhub", "another-app").unwrap());
        let validator = TokenValidator::new(&get_test_jwt_config());

        let token = issuer.issue(1, "admin", "Admin").unwrap();
        assert!(validator.validate(&token).is_err());
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let config = get_test_jwt_config();
        let validator = TokenValidator::new(&config);
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "admin".to_string(),
            jti: Uuid::new_v4().to_string(),
            nameidentifier: "1".to_string(),
            name: "admin".to_string(),
            role: "Admin".to_string(),
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(KEY.as_bytes()),
        )
        .unwrap();

        assert!(validator.validate(&token).is_err());
    }

    #[test]
    fn test_tampered_role_rejected() {
        let (issuer, validator) = pair(&get_test_jwt_config());
        let token = issuer.issue(2, "user1", "User").unwrap();

        let other = issuer.issue(1, "admin", "Admin").unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let other_payload = other.split('.').nth(1).unwrap();
        parts[1] = other_payload;
        let forged = parts.join(".");

        assert!(validator.validate(&forged).is_err());
    }

    #[test]
    fn test_claim_set_is_exact() {
        let (issuer, validator) = pair(&get_test_jwt_config());
        let token = issuer.issue(7, "alice", "User").unwrap();

        let raw = decode::<serde_json::Map<String, serde_json::Value>>(
            &token,
            &validator.decoding_key,
            &validator.validation,
        )
        .unwrap()
        .claims;

        let mut keys: Vec<&str> = raw.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["aud", "exp", "iat", "iss", "jti", "name", "nameidentifier", "role", "sub"]
        );
        assert_eq!(raw["nameidentifier"], "7");
        assert_eq!(raw["name"], "alice");
        assert_eq!(raw["role"], "User");
    }

    #[test]
    fn test_each_token_has_unique_jti() {
        let (issuer, validator) = pair(&get_test_jwt_config());
        let first = validator.validate(&issuer.issue(1, "admin", "Admin").unwrap()).unwrap();
        let second = validator.validate(&issuer.issue(1, "admin", "Admin").unwrap()).unwrap();

        assert_ne!(first.claims().jti, second.claims().jti);
    }
}
