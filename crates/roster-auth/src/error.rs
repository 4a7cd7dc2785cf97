//! Error types for the authenticator.

use roster_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Another credential already uses this email.
    #[error("email already registered")]
    DuplicateEmail,

    /// Another credential already uses this username.
    #[error("username already taken")]
    DuplicateUsername,

    /// Hashing or verifying a password failed outright (not a mismatch).
    #[error("password hashing failed: {0}")]
    HashingFailure(String),

    /// No credential matches the identifier or token subject.
    #[error("credential not found")]
    NotFound,

    /// The credential exists but is not active.
    #[error("account is disabled")]
    Disabled,

    /// The password does not match the stored verifier.
    #[error("invalid password")]
    BadPassword,

    /// The token is not a well-formed token for this service.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Signature mismatch or a signing algorithm other than HS256.
    #[error("bad token signature")]
    BadSignature,

    /// The token's expiry is at or before the current time.
    #[error("token expired")]
    Expired,

    /// Token encoding failed.
    #[error("failed to issue token: {0}")]
    Issue(String),

    /// Invalid authenticator configuration (empty secret, bad hash parameters).
    #[error("invalid auth configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl AuthError {
    /// True for the failures a caller sees as "not authenticated".
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::Malformed(_) | AuthError::BadSignature | AuthError::Expired
        )
    }
}
