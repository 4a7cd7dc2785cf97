//! Table schemas and provisioning.
//!
//! Each logical table has a string key attribute and a set of secondary
//! indexes over top-level string attributes. Unique indexes are where
//! username/email uniqueness is actually enforced.

use crate::error::StoreError;
use crate::store::RecordStore;

/// A secondary index over one top-level attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: &'static str,
    pub attribute: &'static str,
    pub unique: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub key: &'static str,
    pub indexes: &'static [IndexSpec],
}

impl TableSchema {
    pub fn index(&self, name: &str) -> Option<&IndexSpec> {
        self.indexes.iter().find(|i| i.name == name)
    }

    pub fn unique_indexes(&self) -> impl Iterator<Item = &IndexSpec> {
        self.indexes.iter().filter(|i| i.unique)
    }
}

pub const CLIENTS_TABLE: &str = "clients";
pub const USERS_TABLE: &str = "users";

pub const EMAIL_INDEX: &str = "email-index";
pub const STATUS_INDEX: &str = "status-index";
pub const USERNAME_INDEX: &str = "username-index";
pub const ROLE_INDEX: &str = "role-index";

pub const CLIENTS: TableSchema = TableSchema {
    name: CLIENTS_TABLE,
    key: "id",
    indexes: &[
        IndexSpec {
            name: EMAIL_INDEX,
            attribute: "email",
            unique: false,
        },
        IndexSpec {
            name: STATUS_INDEX,
            attribute: "status",
            unique: false,
        },
    ],
};

pub const USERS: TableSchema = TableSchema {
    name: USERS_TABLE,
    key: "id",
    indexes: &[
        IndexSpec {
            name: USERNAME_INDEX,
            attribute: "username",
            unique: true,
        },
        IndexSpec {
            name: EMAIL_INDEX,
            attribute: "email",
            unique: true,
        },
        IndexSpec {
            name: ROLE_INDEX,
            attribute: "role",
            unique: false,
        },
    ],
};

/// Every table the service uses.
pub const ALL_TABLES: &[TableSchema] = &[CLIENTS, USERS];

/// Outcome of provisioning a single table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub table: &'static str,
    pub created: bool,
}

/// Create every table in [`ALL_TABLES`]. Safe to run repeatedly.
pub async fn provision(store: &dyn RecordStore) -> Result<Vec<ProvisionReport>, StoreError> {
    let mut reports = Vec::with_capacity(ALL_TABLES.len());
    for schema in ALL_TABLES {
        let created = store.create_table(schema).await?;
        if created {
            tracing::info!(table = schema.name, "created table");
        } else {
            tracing::debug!(table = schema.name, "table already exists");
        }
        reports.push(ProvisionReport {
            table: schema.name,
            created,
        });
    }
    Ok(reports)
}
