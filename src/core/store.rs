//! Persistence abstractions

use crate::core::ratio::Ratio;
use anyhow::Result;
use async_trait::async_trait;

/// Durable storage for the full list of tracked ratios.
#[async_trait]
pub trait RatioStore: Send + Sync {
    /// Returns `Ok(None)` when nothing has been saved yet. Unreadable or
    /// malformed data is an `Err`.
    async fn load(&self) -> Result<Option<Vec<Ratio>>>;

    /// Replaces the stored list. A failed save leaves the previous snapshot
    /// intact.
    async fn save(&self, ratios: &[Ratio]) -> Result<()>;
}
