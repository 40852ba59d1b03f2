use std::env;
use std::net::SocketAddr;

use crate::ConfigError;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let addr = raw.parse().map_err(|_| ConfigError::Invalid {
            name: "SERVER_ADDR",
            value: raw,
        })?;

        Ok(Self { addr })
    }
}
