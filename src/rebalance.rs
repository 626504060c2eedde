//! Drift report: how far each holding is from target and the trade that fixes it.
//!
//! Percentages are computed in floating point (display values); the amount
//! needed per symbol is rounded half away from zero to whole cents, once.

use std::fmt;

use crate::error::RebalanceError;
use crate::holdings::AggregatedHoldings;
use crate::money::Money;
use crate::policy::AllocationPolicy;

/// Trade direction implied by a drift entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TradeAction {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Sell => write!(f, "SELL"),
            TradeAction::Hold => write!(f, "HOLD"),
        }
    }
}

/// Current versus target for one policy entry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriftEntry {
    pub symbol: String,
    /// Aggregated holdings for the symbol.
    pub current: Money,
    /// Share of the total, 0–100.
    pub current_pct: f64,
    /// Target share, 0–100.
    pub target_pct: f64,
    /// `current_pct - target_pct`; positive means overweight.
    pub drift: f64,
    /// Positive: amount to buy. Negative: amount to sell.
    pub needed: Money,
}

impl DriftEntry {
    pub fn action(&self) -> TradeAction {
        match self.needed.cents() {
            n if n > 0 => TradeAction::Buy,
            n if n < 0 => TradeAction::Sell,
            _ => TradeAction::Hold,
        }
    }

    pub fn is_overweight(&self) -> bool {
        self.drift > 0.0
    }
}

/// Result of a rebalance calculation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RebalanceReport {
    /// Tracked holdings plus the pending deposit.
    pub total: Money,
    /// Deposit included in `total`.
    pub pending_deposit: Money,
    /// One entry per policy entry, in policy order.
    pub entries: Vec<DriftEntry>,
}

impl RebalanceReport {
    pub fn entry(&self, symbol: &str) -> Option<&DriftEntry> {
        self.entries.iter().find(|e| e.symbol == symbol)
    }

    /// Sum of amounts needed. Equals the pending deposit up to one cent of
    /// rounding per entry.
    pub fn net_needed(&self) -> Money {
        // buys and sells can each exceed the cent range before they cancel
        let net: i128 = self
            .entries
            .iter()
            .map(|e| i128::from(e.needed.cents()))
            .sum();
        Money(net.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }

    /// Entries that need buying, in policy order.
    pub fn buys(&self) -> impl Iterator<Item = &DriftEntry> {
        self.entries
            .iter()
            .filter(|e| e.action() == TradeAction::Buy)
    }

    /// Entries that need selling, in policy order.
    pub fn sells(&self) -> impl Iterator<Item = &DriftEntry> {
        self.entries
            .iter()
            .filter(|e| e.action() == TradeAction::Sell)
    }
}

/// Compute drift and amount needed for every policy entry.
///
/// The pending deposit counts toward the total before percentages are taken,
/// so a fresh deposit shows up as money to buy with.
///
/// # Errors
///
/// [`RebalanceError::ZeroTotal`] if holdings plus deposit is not positive, and
/// [`RebalanceError::Overflow`] if that sum leaves the `i64` cent range.
pub fn rebalance(
    policy: &AllocationPolicy,
    holdings: &AggregatedHoldings,
    pending_deposit: Money,
) -> Result<RebalanceReport, RebalanceError> {
    let total = pending_deposit
        .checked_add(holdings.total())
        .ok_or(RebalanceError::Overflow {
            holdings: holdings.total(),
            deposit: pending_deposit,
        })?;
    if !total.is_positive() {
        return Err(RebalanceError::ZeroTotal { total });
    }
    let total_f = total.as_f64();

    let entries = policy
        .entries()
        .iter()
        .map(|entry| {
            let current = holdings.get(&entry.symbol);
            let current_pct = 100.0 * current.as_f64() / total_f;
            let target_pct = entry.target_pct();
            let drift = current_pct - target_pct;
            DriftEntry {
                symbol: entry.symbol.clone(),
                current,
                current_pct,
                target_pct,
                drift,
                needed: Money::from_rounded(total_f * (-drift / 100.0)),
            }
        })
        .collect();

    Ok(RebalanceReport {
        total,
        pending_deposit,
        entries,
    })
}
