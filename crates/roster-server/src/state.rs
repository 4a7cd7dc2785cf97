use crate::operations::{Operation, route_table};
use anyhow::Context;
use roster_auth::Authenticator;
use roster_core::RosterConfig;
use roster_dispatch::{RouteTable, StagePrefixes};
use roster_store::{ClientRepository, CredentialRepository, RecordStore, create_store, provision};
use std::sync::Arc;

/// Shared, read-only application state.
///
/// Everything here is built once at startup; handlers only take `&self`.
pub struct AppState {
    pub routes: RouteTable<Operation>,
    pub auth: Authenticator,
    pub clients: ClientRepository,
}

impl AppState {
    /// Build the configured store, provision its tables and wire everything up.
    pub async fn init(config: &RosterConfig) -> anyhow::Result<Self> {
        let store = create_store(&config.storage)
            .await
            .context("failed to open record store")?;
        Self::with_store(config, store).await
    }

    pub async fn with_store(
        config: &RosterConfig,
        store: Arc<dyn RecordStore>,
    ) -> anyhow::Result<Self> {
        store.ping().await.context("record store unreachable")?;
        provision(store.as_ref())
            .await
            .context("failed to provision tables")?;

        let auth = Authenticator::from_config(
            &config.auth,
            CredentialRepository::new(store.clone()),
        )
        .context("failed to initialise authenticator")?;

        let routes = route_table(StagePrefixes::new(config.server.stage_prefixes.iter().cloned()))
            .context("invalid route table")?;

        Ok(Self {
            routes,
            auth,
            clients: ClientRepository::new(store),
        })
    }
}
