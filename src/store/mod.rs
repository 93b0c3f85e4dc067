pub mod file;
pub mod keyspace;
pub mod memory;

use crate::core::RatioStore;
use crate::core::config::{AppConfig, StorageBackend};
use anyhow::Result;
use file::JsonFileStore;
use keyspace::KeyspaceStore;
use memory::MemoryStore;
use std::sync::Arc;
use tracing::debug;

/// Opens the storage backend selected in the configuration.
pub fn open(config: &AppConfig) -> Result<Arc<dyn RatioStore>> {
    let backend = config.storage.backend;
    let store: Arc<dyn RatioStore> = match backend {
        StorageBackend::File => Arc::new(JsonFileStore::new(&config.data_path()?)),
        StorageBackend::Keyspace => Arc::new(KeyspaceStore::open(&config.data_path()?)?),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    debug!(?backend, "Opened ratio store");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StorageConfig;
    use tempfile::tempdir;

    fn config(backend: StorageBackend, data_path: &std::path::Path) -> AppConfig {
        AppConfig {
            storage: StorageConfig {
                backend,
                data_path: Some(data_path.to_string_lossy().into_owned()),
            },
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_open_each_backend() {
        for backend in [
            StorageBackend::File,
            StorageBackend::Keyspace,
            StorageBackend::Memory,
        ] {
            let dir = tempdir().unwrap();
            let store = open(&config(backend, dir.path())).unwrap();
            assert!(store.load().await.unwrap().is_none());
            store.save(&[]).await.unwrap();
            assert_eq!(store.load().await.unwrap(), Some(vec![]));
        }
    }

    #[tokio::test]
    async fn test_file_backend_location() {
        let dir = tempdir().unwrap();
        let store = open(&config(StorageBackend::File, dir.path())).unwrap();
        store.save(&[]).await.unwrap();
        assert!(dir.path().join(file::RATIOS_FILE_NAME).exists());
    }
}
