//! Market data abstractions

use crate::core::coin::Coin;
use anyhow::Result;
use async_trait::async_trait;

/// Resolves a coin id to a fresh [`Coin`] record. Implementations must be
/// safe to call concurrently for distinct ids.
#[async_trait]
pub trait CoinProvider: Send + Sync {
    async fn fetch_coin(&self, id: &str) -> Result<Coin>;
}
