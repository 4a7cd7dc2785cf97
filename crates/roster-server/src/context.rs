use crate::error::ApiError;
use roster_auth::Claims;
use roster_dispatch::PathParams;

/// Per-request values handed explicitly to every operation.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Path after stage-prefix rewriting.
    pub path: String,
    pub params: PathParams,
    /// Present once the bearer step has verified a token.
    pub identity: Option<Claims>,
}

impl RequestContext {
    pub fn identity(&self) -> Result<&Claims, ApiError> {
        self.identity
            .as_ref()
            .ok_or_else(|| ApiError::unauthorized("User not found in context"))
    }

    pub fn id(&self) -> Result<&str, ApiError> {
        self.params.id().ok_or_else(|| ApiError::BadRequest {
            error: "Missing identifier",
            message: "Client ID is required".to_string(),
        })
    }
}
