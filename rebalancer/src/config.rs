//! Allocation config loading and validation (YAML or TOML).

use std::path::Path;

use fintilt::{AllocationEntry, AllocationPolicy};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub stocks: Vec<StockConfig>,
    #[serde(default)]
    pub csv: CsvConfig,
}

/// One target allocation line. Percentages are on a 0–100 scale.
#[derive(Debug, Clone, Deserialize)]
pub struct StockConfig {
    pub symbol: String,
    pub target_percentage: f64,
    #[serde(default)]
    pub description: String,
    /// Alternate tickers that count toward this symbol.
    #[serde(default, alias = "aliases")]
    pub alternatives: Vec<String>,
}

/// Column names in the holdings CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct CsvConfig {
    #[serde(default = "default_symbol_column")]
    pub symbol_column: String,
    #[serde(default = "default_amount_column")]
    pub amount_column: String,
}

fn default_symbol_column() -> String {
    "Symbol".into()
}
fn default_amount_column() -> String {
    "Current Value".into()
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            symbol_column: default_symbol_column(),
            amount_column: default_amount_column(),
        }
    }
}

impl Config {
    /// Load config from a file: `.toml` as TOML, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(s: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants, including the allocation policy itself.
    fn validate(&self) -> Result<()> {
        if self.stocks.is_empty() {
            return Err(Error::Config("stocks list is empty".into()));
        }
        for stock in &self.stocks {
            if stock.symbol.trim().is_empty() {
                return Err(Error::Config("empty symbol".into()));
            }
            if stock.alternatives.iter().any(|a| a.trim().is_empty()) {
                return Err(Error::Config(format!(
                    "empty alternative symbol for {}",
                    stock.symbol
                )));
            }
        }
        if self.csv.symbol_column.is_empty() || self.csv.amount_column.is_empty() {
            return Err(Error::Config("CSV column names must not be empty".into()));
        }
        self.policy()?;
        Ok(())
    }

    /// Build the validated allocation policy, converting percentages to fractions.
    pub fn policy(&self) -> Result<AllocationPolicy> {
        let entries = self
            .stocks
            .iter()
            .map(|s| {
                AllocationEntry::new(s.symbol.clone(), s.target_percentage / 100.0)
                    .with_description(s.description.clone())
                    .with_aliases(s.alternatives.iter().cloned())
            })
            .collect();
        Ok(AllocationPolicy::new(entries)?)
    }
}
