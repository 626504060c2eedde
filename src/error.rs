//! Error types for parsing, policy validation, aggregation, and rebalancing.

use crate::money::Money;

/// A currency string that is not a dollars-and-cents amount.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid currency amount {input:?}")]
pub struct ParseMoneyError {
    input: String,
}

impl ParseMoneyError {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// The rejected input, as given.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Reasons an allocation policy fails validation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PolicyError {
    /// A target fraction is NaN, infinite, or outside `[0, 1]`.
    #[error("target for {symbol} ({target}) must be within [0, 1]")]
    InvalidTarget { symbol: String, target: f64 },

    /// Target fractions do not add up to 1.0.
    #[error("target fractions sum to {sum} (expected 1.0)")]
    AllocationSum { sum: f64 },

    /// A symbol is claimed twice, as canonical symbol or alias.
    #[error("symbol {symbol} appears multiple times (claimed by {owner} and {claimant})")]
    DuplicateSymbol {
        symbol: String,
        owner: String,
        claimant: String,
    },
}

/// Reasons holdings cannot be aggregated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HoldingsError {
    /// A per-symbol or portfolio total left the `i64` cent range.
    #[error("holdings total overflows at {symbol} (adding {amount})")]
    Overflow { symbol: String, amount: Money },
}

/// Reasons a rebalance cannot be computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RebalanceError {
    /// Holdings plus pending deposit is zero or negative.
    #[error("portfolio total {total} is not positive")]
    ZeroTotal { total: Money },

    /// Holdings plus pending deposit leaves the `i64` cent range.
    #[error("holdings {holdings} plus deposit {deposit} overflow the portfolio total")]
    Overflow { holdings: Money, deposit: Money },
}
