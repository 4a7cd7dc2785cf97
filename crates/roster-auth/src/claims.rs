//! Token claims.

use roster_core::{Credential, Role};
use serde::{Deserialize, Serialize};

/// Issuer written into and required from every token.
pub const ISSUER: &str = "roster";

/// The verified payload of a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Credential id.
    pub sub: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    /// Issued at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    pub iss: String,
}

impl Claims {
    pub fn for_credential(credential: &Credential, iat: i64, exp: i64) -> Self {
        Self {
            sub: credential.id.clone(),
            username: credential.username.clone(),
            email: credential.email.clone(),
            role: credential.role,
            iat,
            exp,
            iss: ISSUER.to_string(),
        }
    }
}
