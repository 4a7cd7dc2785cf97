use http::Method;
use thiserror::Error;

/// Why a request could not be resolved to an operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no route matches the path")]
    NotFound,

    /// The path is registered, but not for this method.
    #[error("method not allowed")]
    MethodNotAllowed { allowed: Vec<Method> },
}

impl DispatchError {
    /// Value for an `Allow` response header.
    pub fn allow_header(&self) -> Option<String> {
        match self {
            DispatchError::NotFound => None,
            DispatchError::MethodNotAllowed { allowed } => Some(
                allowed
                    .iter()
                    .map(Method::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        }
    }
}

/// A route table that cannot be built.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("path '{0}' must start with '/'")]
    RelativePath(String),

    #[error("prefix bucket '{0}' must end with '/'")]
    BucketWithoutSlash(String),

    #[error("reserved suffix '{suffix}' under '{bucket}' must be a single non-empty segment")]
    BadSuffix { bucket: String, suffix: String },

    #[error("{method} {path} is registered twice")]
    Duplicate { method: Method, path: String },
}
