//! Process-local record store.

use crate::error::StoreError;
use crate::schema::TableSchema;
use crate::store::{Item, RecordStore, item_key};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

struct MemoryTable {
    schema: TableSchema,
    // Insertion order is preserved; lookups are linear.
    rows: Vec<(String, Item)>,
}

impl MemoryTable {
    fn position(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|(k, _)| k == id)
    }

    /// The first unique index whose value in `item` is held by a row with another key.
    fn conflicting_index(&self, id: &str, item: &Item) -> Option<&'static str> {
        self.schema.unique_indexes().find_map(|index| {
            let value = item.get(index.attribute).and_then(Value::as_str)?;
            self.rows
                .iter()
                .any(|(k, row)| {
                    k != id && row.get(index.attribute).and_then(Value::as_str) == Some(value)
                })
                .then_some(index.name)
        })
    }
}

/// In-memory backend guarded by a single `RwLock`.
///
/// The uniqueness check and the write happen under one write guard, so two
/// concurrent `put`s of the same unique value cannot both succeed.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, MemoryTable>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn unknown(table: &str) -> StoreError {
    StoreError::UnknownTable(table.to_string())
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create_table(&self, schema: &TableSchema) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.contains_key(schema.name) {
            return Ok(false);
        }
        tables.insert(
            schema.name.to_string(),
            MemoryTable {
                schema: *schema,
                rows: Vec::new(),
            },
        );
        Ok(true)
    }

    async fn get_by_id(&self, table: &str, id: &str) -> Result<Item, StoreError> {
        let tables = self.tables.read().await;
        let t = tables.get(table).ok_or_else(|| unknown(table))?;
        t.position(id)
            .map(|pos| t.rows[pos].1.clone())
            .ok_or_else(|| StoreError::NotFound {
                table: table.to_string(),
                id: id.to_string(),
            })
    }

    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let t = tables.get_mut(table).ok_or_else(|| unknown(table))?;
        let id = item_key(&t.schema, &item)?;

        if let Some(index) = t.conflicting_index(&id, &item) {
            return Err(StoreError::Conflict {
                table: table.to_string(),
                index: index.to_string(),
            });
        }

        match t.position(&id) {
            Some(pos) => t.rows[pos].1 = item,
            None => t.rows.push((id, item)),
        }
        Ok(())
    }

    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError> {
        let tables = self.tables.read().await;
        let t = tables.get(table).ok_or_else(|| unknown(table))?;
        Ok(t.rows.iter().map(|(_, item)| item.clone()).collect())
    }

    async fn query_by_index(
        &self,
        table: &str,
        index: &str,
        key: &str,
    ) -> Result<Vec<Item>, StoreError> {
        let tables = self.tables.read().await;
        let t = tables.get(table).ok_or_else(|| unknown(table))?;
        let spec = t.schema.index(index).ok_or_else(|| StoreError::UnknownIndex {
            table: table.to_string(),
            index: index.to_string(),
        })?;

        Ok(t.rows
            .iter()
            .filter(|(_, item)| item.get(spec.attribute).and_then(Value::as_str) == Some(key))
            .map(|(_, item)| item.clone())
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
