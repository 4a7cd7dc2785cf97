//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// Listener settings and deployment-stage path prefixes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:8080"
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Leading path segments stripped before routing (`/prod/api/clients` -> `/api/clients`).
    #[serde(default = "default_stage_prefixes")]
    pub stage_prefixes: Vec<String>,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_stage_prefixes() -> Vec<String> {
    vec!["prod".to_string(), "dev".to_string(), "staging".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            stage_prefixes: default_stage_prefixes(),
        }
    }
}
