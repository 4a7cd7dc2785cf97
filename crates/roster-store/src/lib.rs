//! # roster-store
//!
//! Record storage for the roster service.
//!
//! The [`RecordStore`] trait is the only thing the rest of the workspace talks
//! to. Two backends implement it:
//!
//! - [`MemoryStore`]: process-local, used by default and in tests
//! - [`SqliteStore`]: a SQLite file via `sqlx`
//!
//! Typed repositories ([`ClientRepository`], [`CredentialRepository`]) handle
//! marshaling between items and the models in `roster-core`.

pub mod error;
pub mod memory;
pub mod repository;
pub mod schema;
pub mod seed;
pub mod sqlite;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use repository::{ClientRepository, CredentialRepository, StoredCredential};
pub use schema::{ALL_TABLES, ProvisionReport, TableSchema, provision};
pub use sqlite::SqliteStore;
pub use store::{Item, RecordStore, create_store};
