use std::env;
use std::fmt;

use crate::ConfigError;

/// Minimum signing key size: 256 bits.
pub const MIN_KEY_BYTES: usize = 32;

/// Token signing and validation settings.
///
/// Constructed once at startup and never mutated. The key is checked here so
/// a weak or missing key stops the process before it serves a request.
#[derive(Clone)]
pub struct JwtConfig {
    pub key: String,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    pub fn new(
        key: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let key = key.into();
        let issuer = issuer.into();
        let audience = audience.into();

        if key.is_empty() {
            return Err(ConfigError::Missing("JWT_KEY"));
        }
        if key.len() < MIN_KEY_BYTES {
            return Err(ConfigError::KeyTooShort {
                actual: key.len(),
                required: MIN_KEY_BYTES,
            });
        }
        if issuer.trim().is_empty() {
            return Err(ConfigError::Missing("JWT_ISSUER"));
        }
        if audience.trim().is_empty() {
            return Err(ConfigError::Missing("JWT_AUDIENCE"));
        }

        Ok(Self {
            key,
            issuer,
            audience,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let key = env::var("JWT_KEY").map_err(|_| ConfigError::Missing("JWT_KEY"))?;
        let issuer = env::var("JWT_ISSUER").map_err(|_| ConfigError::Missing("JWT_ISSUER"))?;
        let audience =
            env::var("JWT_AUDIENCE").map_err(|_| ConfigError::Missing("JWT_AUDIENCE"))?;

        Self::new(key, issuer, audience)
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}
