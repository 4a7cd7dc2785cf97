//! # roster-core
//!
//! Types shared by every roster crate:
//! - [`RosterConfig`] and its sections, loaded once at startup
//! - Record models for the two tables the service manages (clients, users)
//!
//! Nothing in here performs I/O beyond reading the config file.

// Configuration types shared across all roster crates
pub mod config;

pub mod models;
pub mod validation;

pub use config::{AuthConfig, RosterConfig, ServerConfig, StorageBackend, StorageConfig};
pub use models::{Client, ClientStatus, Credential, Role};
pub use validation::{LoginRequest, NewClient, RegistrationRequest, ValidationError};
