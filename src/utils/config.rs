// Configuration utilities
// YAML файл + переопределения из окружения (.env подхватывают бинарники через dotenvy)

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analytics::default_amounts;
use crate::api::gateway::CHANGENOW_API_URL;
use crate::api::price::COINGECKO_API_URL;
use crate::api::{APIClient, APIGateway, ExchangeClients, PriceReference};

pub const ENV_API_KEY: &str = "CHANGENOW_API_KEY";
pub const ENV_API_URL: &str = "CHANGENOW_API_URL";
pub const ENV_PRICE_URL: &str = "COINGECKO_API_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config format: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    pub base_url: String,
    /// Never committed: comes from the file or `CHANGENOW_API_KEY`.
    pub api_key: Option<String>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: CHANGENOW_API_URL.to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceConfig {
    pub base_url: String,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub from: String,
    pub to: String,
    pub fixed_rate: bool,
    pub amounts: Vec<f64>,
    /// CoinGecko id of the `to` currency.
    pub coin_id: String,
    /// CoinGecko code of the `from` currency.
    pub vs_currency: String,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            from: "BTC".to_string(),
            to: "XMR".to_string(),
            fixed_rate: false,
            amounts: default_amounts(),
            coin_id: "monero".to_string(),
            vs_currency: "btc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub exchange: ExchangeConfig,
    pub price: PriceConfig,
    pub sweep: SweepConfig,
}

impl AppConfig {
    /// Defaults plus whatever the environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v: &String| !v.trim().is_empty());

        if let Some(api_key) = non_empty(ENV_API_KEY) {
            self.exchange.api_key = Some(api_key);
        }
        if let Some(url) = non_empty(ENV_API_URL) {
            self.exchange.base_url = url;
        }
        if let Some(url) = non_empty(ENV_PRICE_URL) {
            self.price.base_url = url;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exchange.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("exchange.base_url is empty".to_string()));
        }
        if self.price.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("price.base_url is empty".to_string()));
        }
        self.sweep.validate()
    }

    pub fn gateway(&self) -> APIGateway {
        let gateway = APIGateway::new(self.exchange.base_url.clone());
        match &self.exchange.api_key {
            Some(key) => gateway.with_api_key(key.clone()),
            None => gateway,
        }
    }

    pub fn price_reference(&self) -> PriceReference {
        PriceReference::new(self.price.base_url.clone())
    }

    /// Both upstreams behind one connection pool.
    pub fn clients(&self) -> ExchangeClients {
        let client = APIClient::new();
        ExchangeClients::new(
            self.gateway().with_client(client.clone()),
            self.price_reference().with_client(client),
        )
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.from.trim().is_empty() || self.to.trim().is_empty() {
            return Err(ConfigError::Invalid("sweep pair is empty".to_string()));
        }
        if self.amounts.is_empty() {
            return Err(ConfigError::Invalid("sweep.amounts is empty".to_string()));
        }
        if let Some(bad) = self.amounts.iter().find(|a| !a.is_finite() || **a <= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "sweep amount must be positive, got {}",
                bad
            )));
        }
        if self.coin_id.trim().is_empty() || self.vs_currency.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "sweep.coin_id and sweep.vs_currency are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Read a YAML config file, then layer environment overrides on top.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut config = AppConfig::from_yaml(&content)?;
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}
