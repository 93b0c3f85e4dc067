use crate::core::cache::Cache;
use crate::core::config::CoinGeckoProviderConfig;
use crate::core::{Coin, CoinProvider};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use std::sync::Arc;
use tracing::{debug, instrument};

const COIN_QUERY: &str = "localization=false&tickers=false&market_data=true\
&community_data=false&developer_data=false&sparkline=false";

pub struct CoinGeckoProvider {
    base_url: Url,
    client: reqwest::Client,
    cache: Arc<Cache<String, Coin>>,
}

impl CoinGeckoProvider {
    pub fn new(config: &CoinGeckoProviderConfig, cache: Arc<Cache<String, Coin>>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ratios/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid CoinGecko base URL: {}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Invalid CoinGecko base URL: {}", config.base_url));
        }

        Ok(CoinGeckoProvider {
            base_url,
            client,
            cache,
        })
    }

    /// `<base>/coins/<id>?<query>`, with the id encoded as one path segment.
    fn coin_url(&self, id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Base URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .push("coins")
            .push(id);
        url.set_query(Some(COIN_QUERY));
        Ok(url)
    }
}

#[async_trait]
impl CoinProvider for CoinGeckoProvider {
    #[instrument(name = "CoinGeckoFetch", skip(self), fields(id = %id))]
    async fn fetch_coin(&self, id: &str) -> Result<Coin> {
        if id.trim().is_empty() {
            return Err(anyhow!("Coin id must not be empty"));
        }

        if let Some(cached) = self.cache.get(&id.to_string()).await {
            return Ok(cached);
        }

        let url = self.coin_url(id)?;
        debug!("Requesting coin data from {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for coin: {} URL: {}", e, id, url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "CoinGecko returned {} for coin {}: {}",
                status,
                id,
                body
            ));
        }

        let coin: Coin = response
            .json()
            .await
            .with_context(|| format!("Failed to parse CoinGecko response for coin: {id}"))?;

        debug!(
            "Fetched {} ({}) at {:?} USD",
            coin.name,
            coin.symbol,
            coin.usd_price()
        );

        self.cache.put(id.to_string(), coin.clone()).await;
        Ok(coin)
    }
}
