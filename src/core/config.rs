use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CoinGeckoProviderConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub cache_ttl_secs: u64,
}

impl Default for CoinGeckoProviderConfig {
    fn default() -> Self {
        CoinGeckoProviderConfig {
            base_url: DEFAULT_COINGECKO_URL.to_string(),
            timeout_secs: 10,
            cache_ttl_secs: 60,
        }
    }
}

impl CoinGeckoProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub coingecko: CoinGeckoProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file replaced atomically on every save
    #[default]
    File,
    /// fjall keyspace
    Keyspace,
    /// Nothing survives the process
    Memory,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_path: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    pub color: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig { color: true }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when
    /// it does not exist.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "ratios")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.storage.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("", "", "ratios")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
