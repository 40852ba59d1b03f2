use anyhow::Context;
use dotenvy::dotenv;
use tracing::{error, info};

use taskhub::logging::init_tracing;
use taskhub::router::init_router;
use taskhub::state::init_app_state;
use taskhub_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let jwt_config = JwtConfig::from_env().inspect_err(|e| {
        error!(error = %e, "Invalid JWT configuration");
    })?;
    let database_config = DatabaseConfig::from_env()?;
    let server_config = ServerConfig::from_env()?;
    let cors_config = CorsConfig::from_env();

    let state = init_app_state(&jwt_config, &database_config, cors_config).await?;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(server_config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", server_config.addr))?;

    info!(addr = %server_config.addr, "Server running");
    info!("Swagger UI available at /swagger-ui, Scalar at /scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
