use crate::core::{Ratio, RatioStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

pub const RATIOS_FILE_NAME: &str = "ratios.json";

/// Stores the ratio list as a JSON array in a single file.
///
/// Saves go to a temporary file in the same directory which is synced and
/// then renamed over the target, so readers only ever see a complete
/// snapshot.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(RATIOS_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
        let dir = path
            .parent()
            .with_context(|| format!("No parent directory for {}", path.display()))?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl RatioStore for JsonFileStore {
    async fn load(&self) -> Result<Option<Vec<Ratio>>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved ratios at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        let ratios: Vec<Ratio> = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        debug!("Loaded {} ratios from {}", ratios.len(), self.path.display());
        Ok(Some(ratios))
    }

    async fn save(&self, ratios: &[Ratio]) -> Result<()> {
        let contents = serde_json::to_vec_pretty(ratios)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::write_atomic(&path, &contents))
            .await
            .context("Save task failed")??;
        debug!("Saved {} ratios to {}", ratios.len(), self.path.display());
        Ok(())
    }
}
