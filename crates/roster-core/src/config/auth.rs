//! Authentication configuration.
//!
//! Holds the token signing secret source and the Argon2 cost parameters.
//! Token lifetime (24h) and clock-skew leeway (none) are fixed and not
//! configurable.

use serde::{Deserialize, Serialize};

/// Configuration for credential hashing and token signing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Inline signing secret. Prefer `jwt_secret_env` outside development.
    #[serde(default)]
    pub jwt_secret: Option<String>,

    /// Environment variable containing the signing secret.
    #[serde(default = "default_secret_env")]
    pub jwt_secret_env: Option<String>,

    /// Argon2 memory cost in KiB.
    #[serde(default = "default_hash_memory_kib")]
    pub hash_memory_kib: u32,

    /// Argon2 iteration count.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,

    /// Argon2 lanes.
    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
}

fn default_secret_env() -> Option<String> {
    Some("ROSTER_JWT_SECRET".to_string())
}

// 19 MiB / 4 passes lands near 100ms per verification on commodity cores.
fn default_hash_memory_kib() -> u32 {
    19 * 1024
}

fn default_hash_iterations() -> u32 {
    4
}

fn default_hash_parallelism() -> u32 {
    1
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_secret_env: default_secret_env(),
            hash_memory_kib: default_hash_memory_kib(),
            hash_iterations: default_hash_iterations(),
            hash_parallelism: default_hash_parallelism(),
        }
    }
}

impl AuthConfig {
    /// Resolve the signing secret, checking `jwt_secret_env` first.
    ///
    /// Returns `None` when neither source yields a non-empty value.
    pub fn resolve_secret(&self) -> Option<Vec<u8>> {
        if let Some(env_var) = &self.jwt_secret_env {
            if let Ok(secret) = std::env::var(env_var) {
                if !secret.is_empty() {
                    return Some(secret.into_bytes());
                }
            }
        }

        self.jwt_secret
            .as_ref()
            .filter(|s| !s.is_empty())
            .map(|s| s.clone().into_bytes())
    }
}
