//! HTTP error mapping.
//!
//! Every failure leaves the service as `{"error": <short>, "message": <detail>}`.
//! Token failures share one fixed 401 body and internal failures one fixed 500
//! body; their real cause is only logged.

use axum::Json;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use roster_auth::AuthError;
use roster_core::ValidationError;
use roster_dispatch::DispatchError;
use roster_store::StoreError;
use serde::Serialize;
use thiserror::Error;

pub const INVALID_TOKEN: &str = "Invalid or expired token";
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{error}: {message}")]
    BadRequest {
        error: &'static str,
        message: String,
    },

    #[error("{error}: {message}")]
    Unauthorized {
        error: &'static str,
        message: String,
    },

    #[error("{error}: {message}")]
    NotFound {
        error: &'static str,
        message: String,
    },

    #[error("method not allowed")]
    MethodNotAllowed { allowed: Vec<Method> },

    /// Registration collided with an existing username or email.
    #[error("registration conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_body(err: impl std::fmt::Display) -> Self {
        ApiError::BadRequest {
            error: "Invalid request body",
            message: err.to_string(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized {
            error: "Unauthorized",
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        let (error, message) = match self {
            ApiError::BadRequest { error, message }
            | ApiError::Unauthorized { error, message }
            | ApiError::NotFound { error, message } => (*error, message.clone()),
            ApiError::MethodNotAllowed { .. } => (
                "Method not allowed",
                "The requested method is not supported for this resource".to_string(),
            ),
            ApiError::Conflict(reason) => ("Registration failed", reason.clone()),
            ApiError::Internal(_) => (
                "Internal server error",
                "An internal error occurred".to_string(),
            ),
        };
        ErrorBody {
            error: error.to_string(),
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(error = %detail, "request failed");
        }

        let mut response = (self.status(), Json(self.body())).into_response();

        if let ApiError::MethodNotAllowed { allowed } = &self {
            let allow = allowed
                .iter()
                .map(Method::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            if let Ok(value) = HeaderValue::from_str(&allow) {
                response.headers_mut().insert(header::ALLOW, value);
            }
        }
        response
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::NotFound => ApiError::NotFound {
                error: "Not found",
                message: "No route matches the requested path".to_string(),
            },
            DispatchError::MethodNotAllowed { allowed } => ApiError::MethodNotAllowed { allowed },
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest {
            error: err.label(),
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { table, id } => ApiError::NotFound {
                error: "Not found",
                message: format!("no record '{id}' in {table}"),
            },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateEmail | AuthError::DuplicateUsername => {
                ApiError::Conflict(err.to_string())
            }
            AuthError::NotFound | AuthError::BadPassword => ApiError::Unauthorized {
                error: "Login failed",
                message: INVALID_CREDENTIALS.to_string(),
            },
            AuthError::Disabled => ApiError::Unauthorized {
                error: "Login failed",
                message: err.to_string(),
            },
            AuthError::Malformed(_) | AuthError::BadSignature | AuthError::Expired => {
                ApiError::unauthorized(INVALID_TOKEN)
            }
            AuthError::HashingFailure(_)
            | AuthError::Issue(_)
            | AuthError::Configuration(_)
            | AuthError::Storage(_) => ApiError::Internal(err.to_string()),
        }
    }
}
