use ratios::AppCommand;
use ratios::core::Ratio;
use std::fs;
use std::path::Path;
use tracing::{error, info};

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub fn coin_json(id: &str, name: &str, symbol: &str, usd: f64) -> String {
        format!(
            r#"{{
                "id": "{id}",
                "symbol": "{symbol}",
                "name": "{name}",
                "market_data": {{ "current_price": {{ "usd": {usd}, "eur": 1.0 }} }}
            }}"#
        )
    }

    pub async fn mount_coin(server: &MockServer, id: &str, name: &str, symbol: &str, usd: f64) {
        Mock::given(method("GET"))
            .and(path(format!("/coins/{id}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(coin_json(id, name, symbol, usd)),
            )
            .mount(server)
            .await;
    }

    pub async fn mount_missing(server: &MockServer, id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/coins/{id}")))
            .respond_with(
                ResponseTemplate::new(404).set_body_string(r#"{"error":"coin not found"}"#),
            )
            .mount(server)
            .await;
    }
}

fn write_config(dir: &Path, base_url: &str, backend: &str) -> String {
    let config_path = dir.join("config.yaml");
    let config_content = format!(
        r#"
        providers:
          coingecko:
            base_url: {}
            timeout_secs: 5
            cache_ttl_secs: 0
        storage:
          backend: {}
          data_path: {}
        theme:
          color: false
    "#,
        base_url,
        backend,
        dir.join("data").display()
    );
    fs::write(&config_path, config_content).expect("Failed to write config file");
    config_path.to_string_lossy().into_owned()
}

fn saved_ratios(dir: &Path) -> Vec<Ratio> {
    let contents =
        fs::read_to_string(dir.join("data").join("ratios.json")).expect("ratios.json missing");
    serde_json::from_str(&contents).expect("ratios.json is not valid")
}

async fn run(command: AppCommand, config_path: &str) {
    let result = ratios::run_command(command, Some(config_path)).await;
    assert!(
        result.is_ok(),
        "Command failed with: {:?}",
        result.err()
    );
}

fn add(numerator: &str, denominator: &str) -> AppCommand {
    AppCommand::Add {
        numerator: numerator.to_string(),
        denominator: denominator.to_string(),
    }
}

#[test_log::test(tokio::test)]
async fn test_add_refresh_remove_flow() {
    let server = wiremock::MockServer::start().await;
    test_utils::mount_coin(&server, "bitcoin", "Bitcoin", "btc", 60000.0).await;
    test_utils::mount_coin(&server, "ethereum", "Ethereum", "eth", 3000.0).await;
    test_utils::mount_coin(&server, "usd-coin", "USDC", "usdc", 1.0).await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path(), &server.uri(), "file");

    run(add("ethereum", "usd-coin"), &config_path).await;
    run(add("bitcoin", "ethereum"), &config_path).await;

    let saved = saved_ratios(dir.path());
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].label(), "Bitcoin to Ethereum");
    assert_eq!(saved[0].value_string(), "20.00000000");
    assert_eq!(saved[1].label(), "Ethereum to USDC");
    assert_eq!(saved[1].value_string(), "3000.00");

    // Prices move, refresh picks them up without duplicating entries
    server.reset().await;
    test_utils::mount_coin(&server, "bitcoin", "Bitcoin", "btc", 66000.0).await;
    test_utils::mount_coin(&server, "ethereum", "Ethereum", "eth", 3300.0).await;
    test_utils::mount_coin(&server, "usd-coin", "USDC", "usdc", 1.0).await;
    run(AppCommand::Refresh, &config_path).await;

    let saved = saved_ratios(dir.path());
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].value_string(), "20.00000000");
    assert_eq!(saved[0].numerator_coin.usd_price(), Some(66000.0));
    assert_eq!(saved[1].value_string(), "3300.00");

    run(AppCommand::List, &config_path).await;
    run(AppCommand::Remove { position: 1 }, &config_path).await;

    let saved = saved_ratios(dir.path());
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].label(), "Ethereum to USDC");
}

#[test_log::test(tokio::test)]
async fn test_refresh_with_failing_pair() {
    let server = wiremock::MockServer::start().await;
    test_utils::mount_coin(&server, "bitcoin", "Bitcoin", "btc", 60000.0).await;
    test_utils::mount_coin(&server, "usd-coin", "USDC", "usdc", 1.0).await;
    test_utils::mount_coin(&server, "luna", "Terra", "luna", 80.0).await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path(), &server.uri(), "file");
    run(add("bitcoin", "usd-coin"), &config_path).await;
    run(add("luna", "usd-coin"), &config_path).await;

    server.reset().await;
    test_utils::mount_coin(&server, "bitcoin", "Bitcoin", "btc", 70000.0).await;
    test_utils::mount_coin(&server, "usd-coin", "USDC", "usdc", 1.0).await;
    test_utils::mount_missing(&server, "luna").await;

    // A failing pair does not fail the command
    run(AppCommand::Refresh, &config_path).await;

    let saved = saved_ratios(dir.path());
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].label(), "Bitcoin to USDC");
    assert_eq!(saved[0].value_string(), "70000.00000000");
    assert_eq!(saved[1].label(), "Terra to USDC");
    assert_eq!(saved[1].value_string(), "80.00");
}

#[test_log::test(tokio::test)]
async fn test_add_unknown_coin_fails() {
    let server = wiremock::MockServer::start().await;
    test_utils::mount_coin(&server, "bitcoin", "Bitcoin", "btc", 60000.0).await;
    test_utils::mount_missing(&server, "notacoin").await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path(), &server.uri(), "file");

    let result = ratios::run_command(add("bitcoin", "notacoin"), Some(&config_path)).await;
    assert!(result.is_err());
    assert!(!dir.path().join("data").join("ratios.json").exists());
}

#[test_log::test(tokio::test)]
async fn test_corrupt_saved_file_starts_empty() {
    let server = wiremock::MockServer::start().await;
    test_utils::mount_coin(&server, "bitcoin", "Bitcoin", "btc", 60000.0).await;
    test_utils::mount_coin(&server, "ethereum", "Ethereum", "eth", 3000.0).await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path(), &server.uri(), "file");
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data").join("ratios.json"), "{ definitely not json").unwrap();

    run(AppCommand::List, &config_path).await;
    run(add("bitcoin", "ethereum"), &config_path).await;

    let saved = saved_ratios(dir.path());
    assert_eq!(saved.len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_keyspace_backend_flow() {
    let server = wiremock::MockServer::start().await;
    test_utils::mount_coin(&server, "bitcoin", "Bitcoin", "btc", 60000.0).await;
    test_utils::mount_coin(&server, "ethereum", "Ethereum", "eth", 3000.0).await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path(), &server.uri(), "keyspace");

    run(add("bitcoin", "ethereum"), &config_path).await;
    run(AppCommand::Refresh, &config_path).await;
    run(AppCommand::Remove { position: 1 }, &config_path).await;

    // Nothing left to remove
    let result =
        ratios::run_command(AppCommand::Remove { position: 1 }, Some(&config_path)).await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("nope.yaml");
    let result =
        ratios::run_command(AppCommand::List, Some(config_path.to_str().unwrap())).await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
#[ignore = "talks to the live CoinGecko API"]
async fn test_real_coingecko_api() {
    use ratios::core::CoinProvider;
    use ratios::core::cache::Cache;
    use ratios::core::config::CoinGeckoProviderConfig;
    use ratios::providers::coingecko::CoinGeckoProvider;
    use std::sync::Arc;

    let config = CoinGeckoProviderConfig::default();
    let cache = Arc::new(Cache::new(config.cache_ttl()));
    let provider = CoinGeckoProvider::new(&config, cache).unwrap();

    let id = "bitcoin";
    info!(?id, "Fetching coin from CoinGecko");

    match provider.fetch_coin(id).await {
        Ok(coin) => {
            info!(?coin, "Received successful coin response");
            assert_eq!(coin.id, "bitcoin");
            assert!(coin.usd_price().unwrap_or_default() > 0.0, "Price should be positive");
        }
        Err(e) => {
            error!("CoinGecko request failed: {e}\n{e:?}");
            panic!("CoinGecko request failed: {e}");
        }
    }
}
