use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use taskhub_auth::{TokenIssuer, TokenValidator};
use taskhub_config::{CorsConfig, DatabaseConfig, JwtConfig};
use taskhub_db::{CredentialStore, MemoryStore, PgStore, TaskStore};

#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub token_issuer: Arc<TokenIssuer>,
    pub token_validator: Arc<TokenValidator>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        tasks: Arc<dyn TaskStore>,
        jwt_config: &JwtConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            credentials,
            tasks,
            token_issuer: Arc::new(TokenIssuer::new(jwt_config)),
            token_validator: Arc::new(TokenValidator::new(jwt_config)),
            cors_config,
        }
    }

    /// State backed by a freshly seeded [`MemoryStore`].
    pub fn in_memory(jwt_config: &JwtConfig, cors_config: CorsConfig) -> Self {
        let store = Arc::new(MemoryStore::seeded());
        Self::new(store.clone(), store, jwt_config, cors_config)
    }
}

pub async fn init_app_state(
    jwt_config: &JwtConfig,
    database_config: &DatabaseConfig,
    cors_config: CorsConfig,
) -> anyhow::Result<AppState> {
    let Some(url) = database_config.url.as_deref() else {
        info!("DATABASE_URL not set, using seeded in-memory store");
        return Ok(AppState::in_memory(jwt_config, cors_config));
    };

    let store = PgStore::connect(url, database_config)
        .await
        .context("Failed to connect to database")?;

    // A failed migration leaves the server running against whatever schema exists.
    match store.migrate().await {
        Ok(()) => info!("Database migrations applied"),
        Err(e) => error!(error = %e, "Failed to apply database migrations"),
    }

    let store = Arc::new(store);
    Ok(AppState::new(store.clone(), store, jwt_config, cors_config))
}
