//! Configuration types for the roster service.
//!
//! A single [`RosterConfig`] is built at startup from a TOML file and handed to
//! every component constructor. Nothing reads configuration after that.
//!
//! # Configuration file
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:8080"
//! stage_prefixes = ["prod", "dev", "staging"]
//!
//! [auth]
//! jwt_secret_env = "ROSTER_JWT_SECRET"
//!
//! [storage]
//! backend = "sqlite"
//! sqlite_path = "data/roster.sqlite"
//! ```
//!
//! The file path comes from `ROSTER_CONFIG`, falling back to `roster.toml`.
//! When neither exists, defaults are used.

pub mod auth;
pub mod server;
pub mod storage;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use auth::AuthConfig;
pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "ROSTER_CONFIG";

/// Config file read when `ROSTER_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";

/// Complete roster configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    /// HTTP listener and path rewriting.
    #[serde(default)]
    pub server: ServerConfig,

    /// Token signing and password hashing.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Record storage backend.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl RosterConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Load configuration from an explicit file path.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("failed to read config file {}: {}", path.display(), e)
        })?;
        Self::from_toml(&raw)
    }
}

/// Load configuration from `ROSTER_CONFIG` or `roster.toml`.
///
/// A missing default file is not an error; an explicitly named file that
/// cannot be read is.
pub fn load_config() -> anyhow::Result<RosterConfig> {
    if let Ok(p) = std::env::var(CONFIG_PATH_ENV) {
        return RosterConfig::from_file(&PathBuf::from(p));
    }

    let path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if path.exists() {
        RosterConfig::from_file(&path)
    } else {
        Ok(RosterConfig::default())
    }
}
