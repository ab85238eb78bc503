use deliverdesk_api::{ApiClient, RetryConfig, SessionStore, DEFAULT_API_BASE, PUSH_TOKEN_ENDPOINT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::location::{default_locations, LocationOption};

/// Environment variable that selects the backend host
pub const API_URL_ENV: &str = "DELIVERDESK_API_URL";

/// Main configuration structure
///
/// Loaded from the config file, then environment, then CLI flags on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default = "default_locations")]
    pub locations: Vec<LocationOption>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            catalog: CatalogConfig::default(),
            display: DisplayConfig::default(),
            locations: default_locations(),
        }
    }
}

impl Config {
    /// Load config from the default location (defaults if there's no file),
    /// then apply environment overrides
    pub fn load() -> crate::Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
    }

    /// Build the shared HTTP client from the api section
    pub fn api_client(&self, session: SessionStore) -> crate::Result<ApiClient> {
        ApiClient::builder(&self.api.base_url)
            .timeout(Duration::from_secs(self.api.timeout_secs))
            .retry_config(RetryConfig::with_max_retries(self.api.max_retries))
            .session(session)
            .build()
            .map_err(|e| crate::Error::ConfigError(format!("Failed to build HTTP client: {}", e)))
    }

    fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("deliverdesk");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries for read requests; mutations are never retried
    #[serde(default)]
    pub max_retries: u32,

    /// Secondary host that manages device push tokens
    #[serde(default = "default_push_token_url")]
    pub push_token_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout() -> u64 {
    deliverdesk_api::DEFAULT_TIMEOUT_SECS
}

fn default_push_token_url() -> String {
    PUSH_TOKEN_ENDPOINT.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: 0,
            push_token_url: default_push_token_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// How many stores the cross-store product listing walks; 0 means all
    #[serde(default = "default_store_limit")]
    pub store_limit: usize,
}

fn default_store_limit() -> usize {
    crate::catalog::DEFAULT_STORE_LIMIT
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            store_limit: default_store_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// ISO currency code used for amounts
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Rows per page in listings
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_currency() -> String {
    "NGN".to_string()
}

fn default_page_size() -> usize {
    20
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            page_size: default_page_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://api.deliverdesk.app");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.max_retries, 0);
        assert_eq!(config.catalog.store_limit, 20);
        assert_eq!(config.display.currency, "NGN");
        assert_eq!(config.locations[0].value, "all");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"https://staging.deliverdesk.app\"\n\n[catalog]\nstore_limit = 50\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "https://staging.deliverdesk.app");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.catalog.store_limit, 50);
        assert!(!config.locations.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.display.currency = "USD".into();
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.display.currency, "USD");
        assert_eq!(reloaded.locations.len(), config.locations.len());
    }

    #[test]
    fn test_env_overrides_base_url() {
        let mut config = Config::default();
        config.apply_env(|key| {
            (key == API_URL_ENV).then(|| "http://localhost:4000 ".to_string())
        });
        assert_eq!(config.api.base_url, "http://localhost:4000");

        // Blank values are ignored
        config.apply_env(|_| Some("  ".to_string()));
        assert_eq!(config.api.base_url, "http://localhost:4000");
    }

    #[test]
    fn test_garbage_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api = [[[").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(crate::Error::ConfigError(_))));
    }
}
