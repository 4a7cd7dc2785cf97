//! `roster clients`

use super::open_store;
use anyhow::Context;
use roster_core::{Client, RosterConfig};
use roster_store::{ClientRepository, provision};

pub async fn print_clients(config: &RosterConfig) -> anyhow::Result<()> {
    let clients = load_clients(config).await?;
    println!("{}", serde_json::to_string_pretty(&clients)?);
    Ok(())
}

/// A fresh store handle only knows tables it has provisioned itself.
async fn load_clients(config: &RosterConfig) -> anyhow::Result<Vec<Client>> {
    let store = open_store(config).await?;
    provision(store.as_ref())
        .await
        .context("failed to provision tables")?;
    Ok(ClientRepository::new(store).list().await?)
}
