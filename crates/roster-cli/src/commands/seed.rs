//! `roster seed`: development fixtures.

use super::open_store;
use anyhow::Context;
use chrono::Utc;
use roster_auth::CredentialHasher;
use roster_core::RosterConfig;
use roster_store::seed::{fixture_clients, fixture_staff};
use roster_store::{ClientRepository, CredentialRepository, RecordStore, provision};
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
pub struct SeedSummary {
    pub clients: usize,
    pub staff: usize,
}

pub async fn seed(config: &RosterConfig, password: &str) -> anyhow::Result<()> {
    anyhow::ensure!(!password.is_empty(), "seed password must not be empty");

    let hasher = CredentialHasher::from_config(&config.auth)?;
    let store = open_store(config).await?;
    let summary = run(store, &hasher, password).await?;

    println!(
        "✔ Seeded {} clients and {} staff accounts",
        summary.clients, summary.staff
    );
    Ok(())
}

async fn run(
    store: Arc<dyn RecordStore>,
    hasher: &CredentialHasher,
    password: &str,
) -> anyhow::Result<SeedSummary> {
    provision(store.as_ref())
        .await
        .context("failed to provision tables")?;

    let now = Utc::now();
    let clients = ClientRepository::new(store.clone());
    let fixtures = fixture_clients(now);
    for client in &fixtures {
        clients
            .put(client)
            .await
            .with_context(|| format!("failed to write client {}", client.id))?;
    }

    let hash = hasher.hash(password).await?;
    let credentials = CredentialRepository::new(store);
    let staff = fixture_staff(&hash, now);
    for record in &staff {
        credentials
            .put(record)
            .await
            .with_context(|| format!("failed to write user {}", record.credential.username))?;
        tracing::debug!(username = %record.credential.username, "seeded user");
    }

    Ok(SeedSummary {
        clients: fixtures.len(),
        staff: staff.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_store::MemoryStore;

    #[tokio::test]
    async fn test_seed_writes_fixtures_and_reruns_cleanly() {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
        let hasher = CredentialHasher::new(256, 1, 1).unwrap();

        let summary = run(store.clone(), &hasher, "seedpass1").await.unwrap();
        assert_eq!(summary, SeedSummary { clients: 5, staff: 4 });

        // Same ids again: replaced in place, no uniqueness conflict.
        run(store.clone(), &hasher, "seedpass1").await.unwrap();

        let clients = ClientRepository::new(store.clone()).list().await.unwrap();
        assert_eq!(clients.len(), 5);

        let admin = CredentialRepository::new(store)
            .find_by_username("admin")
            .await
            .unwrap()
            .unwrap();
        assert!(hasher.verify("seedpass1", &admin.password_hash).await.unwrap());
    }
}
