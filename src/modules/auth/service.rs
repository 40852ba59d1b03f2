use anyhow::anyhow;
use tracing::{info, instrument};

use taskhub_auth::TokenIssuer;
use taskhub_core::AppError;
use taskhub_db::CredentialStore;
use taskhub_models::{Account, LoginRequest, LoginResponse};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub struct AuthService;

impl AuthService {
    /// Checks submitted credentials against the store.
    ///
    /// The username is trimmed and matched ignoring case; the password is
    /// trimmed and must equal the stored one exactly. An unknown username
    /// and a wrong password fail identically.
    #[instrument(skip_all, fields(username = %dto.username.trim()))]
    pub async fn verify_credentials(
        store: &dyn CredentialStore,
        dto: &LoginRequest,
    ) -> Result<Account, AppError> {
        if dto.username.is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        if dto.password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let account = store
            .find_by_username(dto.username.trim())
            .await?
            .ok_or_else(|| {
                AppError::authentication(INVALID_CREDENTIALS)
                    .with_source(anyhow!("no account matches the username"))
            })?;

        if account.password != dto.password.trim() {
            return Err(AppError::authentication(INVALID_CREDENTIALS)
                .with_source(anyhow!("password mismatch for account {}", account.id)));
        }

        Ok(account)
    }

    #[instrument(skip_all)]
    pub async fn login_user(
        store: &dyn CredentialStore,
        issuer: &TokenIssuer,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let account = Self::verify_credentials(store, &dto).await?;
        let token = issuer.issue(account.id, &account.username, &account.role)?;

        info!(account_id = account.id, role = %account.role, "Login succeeded");

        Ok(LoginResponse {
            token,
            user: account.summary(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskhub_auth::TokenValidator;
    use taskhub_config::JwtConfig;
    use taskhub_core::ErrorKind;
    use taskhub_db::MemoryStore;

    fn request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_username_case_and_whitespace_ignored() {
        let store = MemoryStore::seeded();
        for username in ["admin", "ADMIN", "Admin ", "  aDmIn\t"] {
            let account = AuthService::verify_credentials(&store, &request(username, "admin123"))
                .await
                .unwrap();
            assert_eq!(account.id, 1, "username {:?}", username);
        }
    }

    #[tokio::test]
    async fn test_password_trimmed_but_case_sensitive() {
        let store = MemoryStore::seeded();
        assert!(
            AuthService::verify_credentials(&store, &request("user1", " user123 "))
                .await
                .is_ok()
        );

        let err = AuthService::verify_credentials(&store, &request("user1", "USER123"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Invalid credentials");
    }

    #[tokio::test]
    async fn test_unknown_user_same_error_as_wrong_password() {
        let store = MemoryStore::seeded();
        let unknown = AuthService::verify_credentials(&store, &request("ghost", "admin123"))
            .await
            .unwrap_err();
        let wrong = AuthService::verify_credentials(&store, &request("admin", "nope"))
            .await
            .unwrap_err();

        assert_eq!(unknown.kind, wrong.kind);
        assert_eq!(unknown.message, wrong.message);
    }

    #[tokio::test]
    async fn test_empty_fields_are_validation_errors() {
        let store = MemoryStore::seeded();

        let err = AuthService::verify_credentials(&store, &request("", "admin123"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Username is required");

        let err = AuthService::verify_credentials(&store, &request("admin", ""))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Password is required");

        let err = AuthService::verify_credentials(&store, &request("", ""))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Username is required");
    }

    #[tokio::test]
    async fn test_whitespace_username_is_not_empty() {
        let store = MemoryStore::seeded();
        let err = AuthService::verify_credentials(&store, &request("   ", "admin123"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_login_issues_token_with_role() {
        let config =
            JwtConfig::new("service-test-key-0123456789abcdefghij", "taskhub", "taskhub-clients")
                .unwrap();
        let issuer = TokenIssuer::new(&config);
        let validator = TokenValidator::new(&config);
        let store = MemoryStore::seeded();

        let response = AuthService::login_user(&store, &issuer, request("ADMIN ", "admin123"))
            .await
            .unwrap();

        assert_eq!(response.user.id, 1);
        assert_eq!(response.user.username, "admin");
        assert_eq!(response.user.role, "Admin");

        let ctx = validator.validate(&response.token).unwrap();
        assert_eq!(ctx.role(), "Admin");
        assert_eq!(ctx.account_id(), 1);
        assert_eq!(ctx.username(), "admin");
    }
}
