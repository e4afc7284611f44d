use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::SortOrder;
use crate::errors::LedgerError;
use crate::utils::{app_data_dir, config_file_in, ensure_dir, ledger_file_in, write_atomic};

/// User preferences for the command shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub default_sort: SortOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Custom ledger file. Defaults to `ledger.json` in the app data directory.
    pub ledger_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            default_sort: SortOrder::default(),
            ledger_file: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 3] = ["currency", "sort", "ledger-file"];

    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    /// Applies a `config set <key> <value>` style update.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        match key.to_ascii_lowercase().as_str() {
            "currency" => {
                let symbol = value.trim();
                if symbol.is_empty() {
                    return Err(LedgerError::Config("currency symbol must not be empty".into()));
                }
                self.currency_symbol = symbol.to_string();
            }
            "sort" => {
                self.default_sort = value
                    .parse()
                    .map_err(|err: LedgerError| LedgerError::Config(err.to_string()))?;
            }
            "ledger-file" => {
                let trimmed = value.trim();
                self.ledger_file = if trimmed.is_empty() || trimmed == "default" {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                };
            }
            other => {
                return Err(LedgerError::Config(format!(
                    "unknown config key `{other}` (expected one of: {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Formats `amount` with the configured currency symbol and two decimals.
    pub fn format_amount(&self, amount: f64) -> String {
        if amount < 0.0 {
            format!("-{}{:.2}", self.currency_symbol, amount.abs())
        } else {
            format!("{}{:.2}", self.currency_symbol, amount)
        }
    }
}

/// Loads and saves [`Config`] under the application data directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| LedgerError::Config(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    /// Ledger file to open: the configured override, else the default in the base dir.
    pub fn ledger_path(&self, config: &Config) -> PathBuf {
        config
            .ledger_file
            .clone()
            .unwrap_or_else(|| ledger_file_in(&self.base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
        assert_eq!(manager.ledger_path(&Config::default()), dir.path().join("ledger.json"));
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set_value("currency", "€").unwrap();
        config.set_value("sort", "asc").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.default_sort, SortOrder::Asc);
    }

    #[test]
    fn set_value_rejects_unknown_keys_and_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set_value("theme", "dark"),
            Err(LedgerError::Config(_))
        ));
        assert!(matches!(
            config.set_value("sort", "sideways"),
            Err(LedgerError::Config(_))
        ));
    }

    #[test]
    fn format_amount_places_sign_before_symbol() {
        let config = Config::default();
        assert_eq!(config.format_amount(1487.5), "$1487.50");
        assert_eq!(config.format_amount(-30.0), "-$30.00");
    }
}
