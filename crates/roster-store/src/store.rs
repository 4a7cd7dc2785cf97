//! The storage collaborator trait and backend selection.

use crate::error::StoreError;
use crate::memory::MemoryStore;
use crate::schema::TableSchema;
use crate::sqlite::SqliteStore;
use async_trait::async_trait;
use roster_core::config::{StorageBackend, StorageConfig};
use serde_json::{Map, Value};
use std::sync::Arc;

/// A stored item: a JSON object keyed by attribute name.
pub type Item = Map<String, Value>;

/// Key-value record storage with secondary index lookups.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create a table and its indexes. Returns `false` if it already existed.
    async fn create_table(&self, schema: &TableSchema) -> Result<bool, StoreError>;

    /// Fetch one item by key, or `StoreError::NotFound`.
    async fn get_by_id(&self, table: &str, id: &str) -> Result<Item, StoreError>;

    /// Insert or replace the item with the same key.
    ///
    /// Fails with `StoreError::Conflict` when a unique index value is already
    /// held by an item with a different key. Nothing is written in that case.
    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError>;

    /// Every item in the table, in insertion order.
    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError>;

    /// Items whose indexed attribute equals `key`.
    async fn query_by_index(
        &self,
        table: &str,
        index: &str,
        key: &str,
    ) -> Result<Vec<Item>, StoreError>;

    /// Cheap reachability check.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Build the backend named by the configuration.
pub async fn create_store(config: &StorageConfig) -> Result<Arc<dyn RecordStore>, StoreError> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::info!("using in-memory record store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Sqlite => {
            tracing::info!(path = %config.sqlite_path, "using SQLite record store");
            Ok(Arc::new(SqliteStore::open(&config.sqlite_path).await?))
        }
    }
}

/// The item's key attribute as a string.
pub(crate) fn item_key(schema: &TableSchema, item: &Item) -> Result<String, StoreError> {
    item.get(schema.key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| StoreError::MissingKey {
            table: schema.name.to_string(),
            key: schema.key.to_string(),
        })
}
