//! SQLite record store.
//!
//! Each logical table becomes one SQLite table holding the item's key and its
//! JSON body. Secondary indexes are expression indexes over
//! `json_extract(body, '$.<attribute>')`, so unique indexes are enforced by
//! SQLite itself.

use crate::error::StoreError;
use crate::schema::TableSchema;
use crate::store::{Item, RecordStore, item_key};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;

pub struct SqliteStore {
    pool: SqlitePool,
    schemas: RwLock<HashMap<String, TableSchema>>,
}

fn unavailable(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

fn sql_index_name(table: &str, index: &str) -> String {
    format!("{}__{}", table, index.replace('-', "_"))
}

impl SqliteStore {
    /// Open (or create) a database file.
    pub async fn open(path: &str) -> Result<Self, StoreError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Unavailable(format!(
                        "failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(unavailable)?;
        Ok(Self::with_pool(pool))
    }

    /// A private in-memory database.
    ///
    /// Every pooled connection to `sqlite::memory:` is a separate database,
    /// so the pool is pinned to one connection that never expires.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(unavailable)?;
        Ok(Self::with_pool(pool))
    }

    fn with_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            schemas: RwLock::new(HashMap::new()),
        }
    }

    async fn schema(&self, table: &str) -> Result<TableSchema, StoreError> {
        self.schemas
            .read()
            .await
            .get(table)
            .copied()
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))
    }

    async fn fetch_items<'q>(&self, sql: &'q str, binds: &[&'q str]) -> Result<Vec<Item>, StoreError> {
        let mut query = sqlx::query_as::<_, (String,)>(sql);
        for b in binds {
            query = query.bind(*b);
        }
        let rows = query.fetch_all(&self.pool).await.map_err(unavailable)?;
        rows.into_iter()
            .map(|(body,)| serde_json::from_str::<Item>(&body).map_err(StoreError::from))
            .collect()
    }

    /// Name the unique index behind a constraint failure.
    ///
    /// SQLite reports expression-index violations as `index '<name>'`; if the
    /// message does not name one of ours, probe each unique index instead.
    async fn conflicting_index(
        &self,
        schema: &TableSchema,
        id: &str,
        item: &Item,
        message: &str,
    ) -> String {
        if let Some(index) = schema
            .unique_indexes()
            .find(|i| message.contains(&sql_index_name(schema.name, i.name)))
        {
            return index.name.to_string();
        }

        for index in schema.unique_indexes() {
            let Some(value) = item.get(index.attribute).and_then(Value::as_str) else {
                continue;
            };
            let sql = format!(
                r#"SELECT id FROM "{}" WHERE json_extract(body, '$.{}') = ?1 AND id <> ?2 LIMIT 1"#,
                schema.name, index.attribute
            );
            let holder: Result<Option<(String,)>, _> = sqlx::query_as(&sql)
                .bind(value)
                .bind(id)
                .fetch_optional(&self.pool)
                .await;
            if let Ok(Some(_)) = holder {
                return index.name.to_string();
            }
        }

        tracing::warn!(table = schema.name, %message, "unique violation on unrecognized index");
        "unknown".to_string()
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn create_table(&self, schema: &TableSchema) -> Result<bool, StoreError> {
        let existing: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1")
                .bind(schema.name)
                .fetch_optional(&self.pool)
                .await
                .map_err(unavailable)?;

        sqlx::query(&format!(
            r#"CREATE TABLE IF NOT EXISTS "{}" (id TEXT PRIMARY KEY NOT NULL, body TEXT NOT NULL)"#,
            schema.name
        ))
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        for index in schema.indexes {
            let sql = format!(
                r#"CREATE {}INDEX IF NOT EXISTS "{}" ON "{}" (json_extract(body, '$.{}'))"#,
                if index.unique { "UNIQUE " } else { "" },
                sql_index_name(schema.name, index.name),
                schema.name,
                index.attribute
            );
            sqlx::query(&sql)
                .execute(&self.pool)
                .await
                .map_err(unavailable)?;
        }

        self.schemas
            .write()
            .await
            .insert(schema.name.to_string(), *schema);

        Ok(existing.is_none())
    }

    async fn get_by_id(&self, table: &str, id: &str) -> Result<Item, StoreError> {
        let schema = self.schema(table).await?;
        let sql = format!(r#"SELECT body FROM "{}" WHERE id = ?1"#, schema.name);
        self.fetch_items(&sql, &[id])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound {
                table: table.to_string(),
                id: id.to_string(),
            })
    }

    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError> {
        let schema = self.schema(table).await?;
        let id = item_key(&schema, &item)?;
        let body = serde_json::to_string(&item)?;

        let sql = format!(
            r#"INSERT INTO "{}" (id, body) VALUES (?1, ?2)
               ON CONFLICT(id) DO UPDATE SET body = excluded.body"#,
            schema.name
        );
        match sqlx::query(&sql).bind(&id).bind(&body).execute(&self.pool).await {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => {
                let index = self
                    .conflicting_index(&schema, &id, &item, &e.to_string())
                    .await;
                Err(StoreError::Conflict {
                    table: table.to_string(),
                    index,
                })
            }
            Err(e) => Err(unavailable(e)),
        }
    }

    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError> {
        let schema = self.schema(table).await?;
        let sql = format!(r#"SELECT body FROM "{}" ORDER BY rowid"#, schema.name);
        self.fetch_items(&sql, &[]).await
    }

    async fn query_by_index(
        &self,
        table: &str,
        index: &str,
        key: &str,
    ) -> Result<Vec<Item>, StoreError> {
        let schema = self.schema(table).await?;
        let spec = schema.index(index).ok_or_else(|| StoreError::UnknownIndex {
            table: table.to_string(),
            index: index.to_string(),
        })?;

        let sql = format!(
            r#"SELECT body FROM "{}" WHERE json_extract(body, '$.{}') = ?1 ORDER BY rowid"#,
            schema.name, spec.attribute
        );
        self.fetch_items(&sql, &[key]).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(unavailable)
    }
}
