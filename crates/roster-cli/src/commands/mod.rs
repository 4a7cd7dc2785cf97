//! Operator command implementations.

pub mod clients;
pub mod secret;
pub mod seed;
pub mod tables;

use anyhow::Context;
use roster_core::RosterConfig;
use roster_store::{RecordStore, create_store};
use std::sync::Arc;

/// Open the configured record store.
pub(crate) async fn open_store(config: &RosterConfig) -> anyhow::Result<Arc<dyn RecordStore>> {
    let store = create_store(&config.storage)
        .await
        .context("failed to open record store")?;
    store.ping().await.context("record store unreachable")?;
    Ok(store)
}
