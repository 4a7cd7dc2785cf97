//! # roster-auth
//!
//! The authenticator: credential registration, login and stateless bearer
//! tokens.
//!
//! - Password verifiers are Argon2id PHC strings, computed off the async
//!   executor
//! - Tokens are HS256 JWTs valid for 24 hours; any other algorithm is refused
//! - Nothing about a token is stored server-side, so there is no revocation
//!
//! The signing secret and hash costs come from [`roster_core::AuthConfig`] and
//! are fixed for the life of the [`Authenticator`].

pub mod authenticator;
pub mod claims;
pub mod error;
pub mod password;
pub mod secret;
pub mod token;

pub use authenticator::Authenticator;
pub use claims::Claims;
pub use error::AuthError;
pub use password::CredentialHasher;
pub use secret::SigningSecret;
pub use token::{TOKEN_TTL_SECS, TokenCodec};
