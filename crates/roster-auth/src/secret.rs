//! The server-held token signing secret.

use crate::error::AuthError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use roster_core::AuthConfig;
use std::fmt;

/// Opaque signing key bytes. Never printed.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, AuthError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(AuthError::Configuration("signing secret is empty".into()));
        }
        Ok(Self(bytes))
    }

    /// Resolve from configuration: the env var named by `jwt_secret_env`
    /// first, then the inline `jwt_secret`.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let bytes = config.resolve_secret().ok_or_else(|| {
            AuthError::Configuration(format!(
                "no signing secret: set {} or [auth].jwt_secret",
                config.jwt_secret_env.as_deref().unwrap_or("jwt_secret_env")
            ))
        })?;
        Self::new(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// A fresh random 32-byte secret, base64 encoded.
    pub fn generate_encoded() -> String {
        let mut rng = rand::rng();
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        STANDARD.encode(bytes)
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningSecret([{} bytes redacted])", self.0.len())
    }
}
