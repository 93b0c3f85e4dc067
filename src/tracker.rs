//! The tracked ratio list as seen by the user interface.
//!
//! [`RatioTracker`] owns the in-memory [`RatioList`] and is the only writer
//! to it. Every merge or removal happens under a single lock and is followed
//! by a save while the lock is still held, so the store always receives
//! snapshots in the same order the list went through them. Network
//! resolution runs outside the lock.
use crate::core::{Coin, CoinProvider, Ratio, RatioKey, RatioList, RatioStore};
use anyhow::{Context, Result, anyhow};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// One line of the displayed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub label: String,
    pub value: String,
}

impl From<&Ratio> for DisplayRow {
    fn from(ratio: &Ratio) -> Self {
        DisplayRow {
            label: ratio.label(),
            value: ratio.value_string(),
        }
    }
}

/// Result of adding a ratio.
#[derive(Debug, Clone)]
pub struct RatioAdded {
    pub key: RatioKey,
    pub row: DisplayRow,
    pub position: usize,
    /// An entry with the same key was replaced
    pub replaced: bool,
    pub persisted: bool,
}

#[derive(Debug, Clone)]
pub struct RatioRemoved {
    pub ratio: Ratio,
    pub persisted: bool,
}

#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    Updated { key: RatioKey, persisted: bool },
    Failed { key: RatioKey, error: String },
}

impl RefreshOutcome {
    pub fn key(&self) -> &RatioKey {
        match self {
            RefreshOutcome::Updated { key, .. } | RefreshOutcome::Failed { key, .. } => key,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RefreshReport {
    pub updated: Vec<RatioKey>,
    pub failed: Vec<(RatioKey, String)>,
    /// Merges that were applied in memory but could not be saved
    pub save_failures: usize,
}

impl RefreshReport {
    fn record(&mut self, outcome: RefreshOutcome) {
        match outcome {
            RefreshOutcome::Updated { key, persisted } => {
                if !persisted {
                    self.save_failures += 1;
                }
                self.updated.push(key);
            }
            RefreshOutcome::Failed { key, error } => self.failed.push((key, error)),
        }
    }
}

pub struct RatioTracker {
    provider: Arc<dyn CoinProvider>,
    store: Arc<dyn RatioStore>,
    ratios: Mutex<RatioList>,
}

impl RatioTracker {
    /// Loads the saved list. Missing or unreadable data starts an empty list.
    pub async fn open(provider: Arc<dyn CoinProvider>, store: Arc<dyn RatioStore>) -> Self {
        let ratios = match store.load().await {
            Ok(Some(saved)) => RatioList::from_ratios(saved),
            Ok(None) => {
                debug!("No saved ratios, starting empty");
                RatioList::new()
            }
            Err(e) => {
                warn!(error = ?e, "Ignoring unreadable saved ratios");
                RatioList::new()
            }
        };
        info!("Tracking {} ratios", ratios.len());

        Self {
            provider,
            store,
            ratios: Mutex::new(ratios),
        }
    }

    pub async fn display_list(&self) -> Vec<DisplayRow> {
        self.ratios.lock().await.iter().map(DisplayRow::from).collect()
    }

    pub async fn ratios(&self) -> Vec<Ratio> {
        self.ratios.lock().await.as_slice().to_vec()
    }

    pub async fn len(&self) -> usize {
        self.ratios.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.ratios.lock().await.is_empty()
    }

    async fn persist(&self, ratios: &RatioList) -> bool {
        match self.store.save(ratios.as_slice()).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = ?e, "Failed to save ratios, keeping them in memory");
                false
            }
        }
    }

    async fn merge(&self, ratio: Ratio) -> RatioAdded {
        let mut ratios = self.ratios.lock().await;
        let key = ratio.key();
        let row = DisplayRow::from(&ratio);
        let (position, replaced) = ratios.insert(ratio);
        let persisted = self.persist(&ratios).await;
        RatioAdded {
            key,
            row,
            position,
            replaced,
            persisted,
        }
    }

    pub async fn add_ratio(&self, numerator: Coin, denominator: Coin) -> RatioAdded {
        let added = self.merge(Ratio::new(numerator, denominator)).await;
        info!(key = %added.key, value = %added.row.value, "Added ratio");
        added
    }

    /// Resolves both coins and tracks the pair.
    pub async fn add_ratio_by_ids(
        &self,
        numerator_id: &str,
        denominator_id: &str,
    ) -> Result<RatioAdded> {
        let key = RatioKey::new(numerator_id, denominator_id);
        let (numerator, denominator) = self
            .resolve(&key)
            .await
            .with_context(|| format!("Could not resolve {key}"))?;
        Ok(self.add_ratio(numerator, denominator).await)
    }

    /// Removes the ratio at `position` in the displayed order.
    pub async fn remove_ratio(&self, position: usize) -> Result<RatioRemoved> {
        let mut ratios = self.ratios.lock().await;
        let tracked = ratios.len();
        let ratio = ratios
            .remove(position)
            .ok_or_else(|| anyhow!("No ratio at position {position}, tracking {tracked}"))?;
        let persisted = self.persist(&ratios).await;
        info!(key = %ratio.key(), "Removed ratio");
        Ok(RatioRemoved { ratio, persisted })
    }

    async fn resolve(&self, key: &RatioKey) -> Result<(Coin, Coin)> {
        let (numerator, denominator) = futures::try_join!(
            self.provider.fetch_coin(&key.numerator_id),
            self.provider.fetch_coin(&key.denominator_id)
        )?;

        if numerator.id != key.numerator_id || denominator.id != key.denominator_id {
            return Err(anyhow!(
                "Provider answered with {}/{}",
                numerator.id,
                denominator.id
            ));
        }
        Ok((numerator, denominator))
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn refresh_pair(&self, key: RatioKey) -> RefreshOutcome {
        match self.resolve(&key).await {
            Ok((numerator, denominator)) => {
                let added = self.merge(Ratio::new(numerator, denominator)).await;
                debug!(value = %added.row.value, "Refreshed ratio");
                RefreshOutcome::Updated {
                    key,
                    persisted: added.persisted,
                }
            }
            Err(e) => {
                warn!(error = %e, "Could not refresh ratio");
                RefreshOutcome::Failed {
                    key,
                    error: format!("{e:#}"),
                }
            }
        }
    }

    pub async fn refresh(&self) -> RefreshReport {
        self.refresh_with(|_| {}).await
    }

    /// Re-resolves every tracked pair concurrently. Each pair is merged as
    /// soon as both of its coins resolve; a failing pair leaves its entry
    /// untouched and does not affect the others. `on_outcome` is called once
    /// per pair in completion order.
    pub async fn refresh_with<F>(&self, on_outcome: F) -> RefreshReport
    where
        F: Fn(&RefreshOutcome) + Sync,
    {
        let keys = self.ratios.lock().await.keys();
        info!("Refreshing {} ratios", keys.len());

        let on_outcome = &on_outcome;
        let pending = keys.into_iter().map(move |key| async move {
            let outcome = self.refresh_pair(key).await;
            on_outcome(&outcome);
            outcome
        });

        let mut report = RefreshReport::default();
        for outcome in join_all(pending).await {
            report.record(outcome);
        }
        info!(
            updated = report.updated.len(),
            failed = report.failed.len(),
            "Refresh finished"
        );
        report
    }
}
