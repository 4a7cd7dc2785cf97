//! `roster create-tables`

use super::open_store;
use roster_core::RosterConfig;
use roster_store::{ProvisionReport, RecordStore, provision};

pub async fn create_tables(config: &RosterConfig) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let reports = run(store.as_ref()).await?;

    for report in &reports {
        if report.created {
            println!("✔ Created table {}", report.table);
        } else {
            println!("  Table {} already exists", report.table);
        }
    }
    Ok(())
}

async fn run(store: &dyn RecordStore) -> anyhow::Result<Vec<ProvisionReport>> {
    Ok(provision(store).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_store::MemoryStore;

    #[tokio::test]
    async fn test_create_tables_is_idempotent() {
        let store = MemoryStore::new();

        let first = run(&store).await.unwrap();
        assert!(first.iter().all(|r| r.created));
        assert_eq!(first.len(), 2);

        let second = run(&store).await.unwrap();
        assert!(second.iter().all(|r| !r.created));
    }
}
