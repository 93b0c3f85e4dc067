//! Tracked ratios and their display value

use crate::core::coin::Coin;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Coin id whose ratios are shown with satoshi precision.
const HIGH_PRECISION_COIN_ID: &str = "bitcoin";

/// Identity of a tracked ratio. Two ratios with the same key are the same
/// tracked entity, whatever their cached market data says.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RatioKey {
    pub numerator_id: String,
    pub denominator_id: String,
}

impl RatioKey {
    pub fn new(numerator_id: &str, denominator_id: &str) -> Self {
        Self {
            numerator_id: numerator_id.to_string(),
            denominator_id: denominator_id.to_string(),
        }
    }
}

impl Display for RatioKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator_id, self.denominator_id)
    }
}

/// An ordered pair of coins. `PartialEq` compares every field; use
/// [`Ratio::key`] or [`Ratio::same_entity`] for identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ratio {
    #[serde(rename = "numeratorCoin")]
    pub numerator_coin: Coin,
    #[serde(rename = "denominatorCoin")]
    pub denominator_coin: Coin,
}

impl Ratio {
    pub fn new(numerator: Coin, denominator: Coin) -> Self {
        Self {
            numerator_coin: numerator,
            denominator_coin: denominator,
        }
    }

    pub fn key(&self) -> RatioKey {
        RatioKey::new(&self.numerator_coin.id, &self.denominator_coin.id)
    }

    pub fn same_entity(&self, other: &Ratio) -> bool {
        self.numerator_coin.id == other.numerator_coin.id
            && self.denominator_coin.id == other.denominator_coin.id
    }

    /// Price of the numerator in units of the denominator.
    ///
    /// Missing market data and a non-positive denominator price both yield
    /// `0.0` rather than an error.
    pub fn value(&self) -> f64 {
        match (
            self.numerator_coin.usd_price(),
            self.denominator_coin.usd_price(),
        ) {
            (Some(numerator), Some(denominator)) if denominator > 0.0 => {
                let value = numerator / denominator;
                if value.is_finite() { value } else { 0.0 }
            }
            _ => 0.0,
        }
    }

    fn decimals(&self) -> usize {
        if self.numerator_coin.id == HIGH_PRECISION_COIN_ID
            || self.denominator_coin.id == HIGH_PRECISION_COIN_ID
        {
            8
        } else {
            2
        }
    }

    pub fn value_string(&self) -> String {
        format!("{:.*}", self.decimals(), self.value())
    }

    pub fn label(&self) -> String {
        format!(
            "{} to {}",
            self.numerator_coin.name, self.denominator_coin.name
        )
    }
}
