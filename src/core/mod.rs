//! Core business logic abstractions

pub mod cache;
pub mod coin;
pub mod config;
pub mod log;
pub mod provider;
pub mod ratio;
pub mod ratio_list;
pub mod store;

// Re-export main types for cleaner imports
pub use coin::{Coin, CurrentPrice, MarketData};
pub use provider::CoinProvider;
pub use ratio::{Ratio, RatioKey};
pub use ratio_list::RatioList;
pub use store::RatioStore;
