use crate::core::{Ratio, RatioStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION_NAME: &str = "ratios";
const RATIOS_KEY: &str = "ratios";

/// Keeps the whole ratio list as one JSON value under a single key of an
/// fjall partition. Single-key inserts are atomic, and the journal is synced
/// after every save.
pub struct KeyspaceStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl KeyspaceStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        std::fs::create_dir_all(db_path)
            .with_context(|| format!("Failed to create directory: {}", db_path.display()))?;

        let keyspace = fjall::Config::new(db_path.join("keyspace"))
            .open()
            .context("Failed to open keyspace")?;
        let partition = keyspace
            .open_partition(PARTITION_NAME, PartitionCreateOptions::default())
            .context("Failed to open ratios partition")?;

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

#[async_trait]
impl RatioStore for KeyspaceStore {
    async fn load(&self) -> Result<Option<Vec<Ratio>>> {
        let Some(value) = self.partition.get(RATIOS_KEY)? else {
            debug!("No ratios key in keyspace");
            return Ok(None);
        };
        let ratios: Vec<Ratio> =
            serde_json::from_slice(&value).context("Failed to parse stored ratios")?;
        debug!("Loaded {} ratios from keyspace", ratios.len());
        Ok(Some(ratios))
    }

    async fn save(&self, ratios: &[Ratio]) -> Result<()> {
        let value = serde_json::to_vec(ratios)?;
        self.partition.insert(RATIOS_KEY, value)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Saved {} ratios to keyspace", ratios.len());
        Ok(())
    }
}
