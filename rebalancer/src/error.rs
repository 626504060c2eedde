//! Error types for the rebalancer.

use std::path::PathBuf;

use fintilt::{HoldingsError, ParseMoneyError, PolicyError, RebalanceError};

/// All errors that can occur during a rebalancer run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML config: {0}")]
    ConfigToml(#[from] toml::de::Error),

    #[error("failed to parse YAML config: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),

    #[error("invalid allocation: {0}")]
    Policy(#[from] PolicyError),

    #[error("failed to read holdings file {path}: {source}")]
    HoldingsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read holdings CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("holdings CSV has no '{column}' column")]
    MissingColumn { column: String },

    #[error("line {line}: bad amount for {symbol}: {source}")]
    Amount {
        line: u64,
        symbol: String,
        source: ParseMoneyError,
    },

    #[error("cannot total holdings: {0}")]
    Holdings(#[from] HoldingsError),

    #[error("deposit amount {0} must not be negative")]
    NegativeDeposit(fintilt::Money),

    #[error("cannot rebalance: {0}")]
    Rebalance(#[from] RebalanceError),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
