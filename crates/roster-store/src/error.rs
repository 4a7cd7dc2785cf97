//! Error types for the storage crate.

use thiserror::Error;

/// Errors surfaced by a [`RecordStore`](crate::RecordStore) backend.
///
/// `NotFound` and `Unavailable` are distinct so callers can tell a lookup miss
/// from a backend outage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No item with the given key.
    #[error("item '{id}' not found in table '{table}'")]
    NotFound { table: String, id: String },

    /// A unique index value is already held by another item.
    #[error("unique index '{index}' on table '{table}' already holds this value")]
    Conflict { table: String, index: String },

    /// The table has not been provisioned.
    #[error("unknown table '{0}'")]
    UnknownTable(String),

    /// The index is not declared on the table.
    #[error("unknown index '{index}' on table '{table}'")]
    UnknownIndex { table: String, index: String },

    /// The item lacks a string value for the table's key attribute.
    #[error("item for table '{table}' has no string '{key}' attribute")]
    MissingKey { table: String, key: String },

    /// The backend could not be reached or failed mid-operation.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// Item (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
