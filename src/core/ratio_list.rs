//! The ordered collection of tracked ratios.
//!
//! Holds at most one ratio per [`RatioKey`] and keeps entries sorted by the
//! numerator coin's display name.
use crate::core::ratio::{Ratio, RatioKey};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatioList {
    ratios: Vec<Ratio>,
}

impl RatioList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from previously stored ratios. Duplicate keys collapse
    /// to the last occurrence.
    pub fn from_ratios(ratios: Vec<Ratio>) -> Self {
        let mut list = Self::new();
        for ratio in ratios {
            list.merge(ratio);
        }
        list.sort();
        list
    }

    /// Replaces the entry with the same key, or adds a new one, then
    /// re-sorts. Returns the position of the inserted ratio and whether an
    /// existing entry was replaced.
    pub fn insert(&mut self, ratio: Ratio) -> (usize, bool) {
        let key = ratio.key();
        let replaced = self.merge(ratio);
        self.sort();
        let position = self.position_of(&key).unwrap_or_default();
        debug!(%key, position, replaced, "Merged ratio");
        (position, replaced)
    }

    fn merge(&mut self, ratio: Ratio) -> bool {
        let before = self.ratios.len();
        self.ratios.retain(|existing| !existing.same_entity(&ratio));
        let replaced = self.ratios.len() != before;
        self.ratios.push(ratio);
        replaced
    }

    // Stable, byte-wise (case-sensitive) ordering
    fn sort(&mut self) {
        self.ratios
            .sort_by(|a, b| a.numerator_coin.name.cmp(&b.numerator_coin.name));
    }

    pub fn remove(&mut self, position: usize) -> Option<Ratio> {
        if position < self.ratios.len() {
            Some(self.ratios.remove(position))
        } else {
            None
        }
    }

    pub fn get(&self, position: usize) -> Option<&Ratio> {
        self.ratios.get(position)
    }

    pub fn find(&self, key: &RatioKey) -> Option<&Ratio> {
        self.position_of(key).and_then(|p| self.ratios.get(p))
    }

    pub fn position_of(&self, key: &RatioKey) -> Option<usize> {
        self.ratios.iter().position(|r| {
            r.numerator_coin.id == key.numerator_id && r.denominator_coin.id == key.denominator_id
        })
    }

    pub fn keys(&self) -> Vec<RatioKey> {
        self.ratios.iter().map(Ratio::key).collect()
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ratio> {
        self.ratios.iter()
    }

    pub fn as_slice(&self) -> &[Ratio] {
        &self.ratios
    }
}
