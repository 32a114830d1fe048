//! Application configuration management.
//!
//! Configuration is stored at `~/.config/triptally/config.json`: the base
//! currency all amounts are recorded in, the currencies offered by the
//! picker, and an optional data directory override.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/data/cache directory paths
const APP_NAME: &str = "triptally";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default base currency when neither config nor environment says otherwise
pub const DEFAULT_BASE_CURRENCY: &str = "PLN";

/// Environment override for the base currency
const BASE_CURRENCY_ENV: &str = "TRIPTALLY_BASE_CURRENCY";

fn default_base_currency() -> String {
    DEFAULT_BASE_CURRENCY.to_string()
}

fn default_favorites() -> Vec<String> {
    ["PLN", "EUR", "USD", "GBP", "CZK", "CHF"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    #[serde(default = "default_favorites")]
    pub favorite_currencies: Vec<String>,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency(),
            favorite_currencies: default_favorites(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Whether a config file has been written yet
    pub fn exists() -> Result<bool> {
        Ok(Self::config_path()?.exists())
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };

        if let Ok(base) = std::env::var(BASE_CURRENCY_ENV) {
            if !base.trim().is_empty() {
                config.base_currency = base;
            }
        }
        config.base_currency = config.base_currency.trim().to_uppercase();

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Where the trip file and logs live
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Where rate tables are cached
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Currencies offered by the picker: the base first, then favorites.
    pub fn currency_choices(&self) -> Vec<String> {
        let mut choices = vec![self.base_currency.clone()];
        for code in &self.favorite_currencies {
            let code = code.trim().to_uppercase();
            if !code.is_empty() && !choices.contains(&code) {
                choices.push(code);
            }
        }
        choices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_choices_dedupes_base() {
        let config = Config {
            base_currency: "EUR".to_string(),
            favorite_currencies: vec!["eur".to_string(), "USD".to_string(), "".to_string()],
            data_dir: None,
        };
        assert_eq!(config.currency_choices(), vec!["EUR", "USD"]);
    }

    #[test]
    fn test_default_config_offers_the_default_base() {
        let config = Config::default();
        assert_eq!(config.base_currency, DEFAULT_BASE_CURRENCY);
        assert!(config.currency_choices().contains(&"EUR".to_string()));
    }
}
