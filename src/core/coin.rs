//! Coin records as returned by the market data service and persisted on disk

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentPrice {
    /// USD price. `0.0` means the price is unknown.
    #[serde(
        default,
        serialize_with = "serialize_price",
        deserialize_with = "deserialize_price"
    )]
    pub usd: f64,
}

// JSON has no NaN or infinity; those are stored as the unknown price
fn serialize_price<S: Serializer>(usd: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let usd = if usd.is_finite() { *usd } else { 0.0 };
    serializer.serialize_f64(usd)
}

fn deserialize_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let usd = Option::<f64>::deserialize(deserializer)?;
    Ok(usd.filter(|p| p.is_finite()).unwrap_or(0.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    #[serde(alias = "currentPrice")]
    pub current_price: CurrentPrice,
}

/// A coin as resolved from the market data service.
///
/// A refreshed coin is always a new value; existing values are never updated
/// in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default, alias = "marketData")]
    pub market_data: Option<MarketData>,
}

impl Coin {
    pub fn new(id: &str, name: &str, symbol: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            market_data: None,
        }
    }

    pub fn with_usd_price(mut self, usd: f64) -> Self {
        self.market_data = Some(MarketData {
            current_price: CurrentPrice { usd },
        });
        self
    }

    pub fn usd_price(&self) -> Option<f64> {
        self.market_data.map(|m| m.current_price.usd)
    }
}
