//! Typed access to the `clients` and `users` tables.

use crate::error::StoreError;
use crate::schema::{CLIENTS_TABLE, EMAIL_INDEX, STATUS_INDEX, USERNAME_INDEX, USERS_TABLE};
use crate::store::{Item, RecordStore};
use roster_core::{Client, ClientStatus, Credential};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

fn to_item<T: Serialize>(record: &T) -> Result<Item, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Serialization(serde::ser::Error::custom(format!(
            "expected a JSON object, got {other}"
        )))),
    }
}

fn from_item<T: DeserializeOwned>(item: Item) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(item))?)
}

fn from_items<T: DeserializeOwned>(items: Vec<Item>) -> Result<Vec<T>, StoreError> {
    items.into_iter().map(from_item).collect()
}

#[derive(Clone)]
pub struct ClientRepository {
    store: Arc<dyn RecordStore>,
}

impl ClientRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Client>, StoreError> {
        from_items(self.store.scan(CLIENTS_TABLE).await?)
    }

    pub async fn list_by_status(&self, status: ClientStatus) -> Result<Vec<Client>, StoreError> {
        let items = self
            .store
            .query_by_index(CLIENTS_TABLE, STATUS_INDEX, status.as_str())
            .await?;
        from_items(items)
    }

    /// Fetch by id. A miss is `StoreError::NotFound`.
    pub async fn get(&self, id: &str) -> Result<Client, StoreError> {
        from_item(self.store.get_by_id(CLIENTS_TABLE, id).await?)
    }

    pub async fn put(&self, client: &Client) -> Result<(), StoreError> {
        self.store.put(CLIENTS_TABLE, to_item(client)?).await
    }
}

/// A credential as persisted, including its password verifier.
///
/// Only the authenticator and provisioning tools handle this type; everything
/// else sees [`Credential`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    #[serde(flatten)]
    pub credential: Credential,
    pub password_hash: String,
}

#[derive(Clone)]
pub struct CredentialRepository {
    store: Arc<dyn RecordStore>,
}

impl CredentialRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: &str) -> Result<StoredCredential, StoreError> {
        from_item(self.store.get_by_id(USERS_TABLE, id).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<StoredCredential>, StoreError> {
        self.find_one(EMAIL_INDEX, email).await
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredential>, StoreError> {
        self.find_one(USERNAME_INDEX, username).await
    }

    /// Insert or replace. Duplicate usernames or emails fail with `StoreError::Conflict`.
    pub async fn put(&self, record: &StoredCredential) -> Result<(), StoreError> {
        self.store.put(USERS_TABLE, to_item(record)?).await
    }

    pub async fn list(&self) -> Result<Vec<StoredCredential>, StoreError> {
        from_items(self.store.scan(USERS_TABLE).await?)
    }

    async fn find_one(
        &self,
        index: &str,
        key: &str,
    ) -> Result<Option<StoredCredential>, StoreError> {
        let items = self.store.query_by_index(USERS_TABLE, index, key).await?;
        items.into_iter().next().map(from_item).transpose()
    }
}
