//! Bearer token step run before protected operations.

use crate::error::{ApiError, INVALID_TOKEN};
use axum::http::{HeaderMap, header};
use roster_auth::{Authenticator, Claims};

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// A missing or malformed header is rejected here, before the authenticator
/// ever sees it.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Authorization header required"))?;

    let invalid_format = || ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>");
    let value = value.to_str().map_err(|_| invalid_format())?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(invalid_format()),
    }
}

/// Verify the request's bearer token and return its claims.
pub fn authenticate(auth: &Authenticator, headers: &HeaderMap) -> Result<Claims, ApiError> {
    let token = bearer_token(headers)?;
    auth.verify_token(token).map_err(|e| {
        tracing::debug!(reason = %e, "token rejected");
        ApiError::unauthorized(INVALID_TOKEN)
    })
}
