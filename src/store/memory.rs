use crate::core::{Ratio, RatioStore};
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory store; nothing outlives the process.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Option<Vec<Ratio>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ratios(ratios: Vec<Ratio>) -> Self {
        Self {
            inner: Mutex::new(Some(ratios)),
        }
    }
}

#[async_trait]
impl RatioStore for MemoryStore {
    async fn load(&self) -> Result<Option<Vec<Ratio>>> {
        Ok(self.inner.lock().await.clone())
    }

    async fn save(&self, ratios: &[Ratio]) -> Result<()> {
        *self.inner.lock().await = Some(ratios.to_vec());
        debug!("Stored {} ratios in memory", ratios.len());
        Ok(())
    }
}
