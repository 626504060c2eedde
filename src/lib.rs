// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! # fintilt
//!
//! A fixed-point portfolio rebalancing engine: given a target allocation and a
//! snapshot of current holdings, compute how far each asset has drifted and how
//! much money should move to restore the target.
//!
//! ## Features
//!
//! - **Integer cents**: every currency amount is a [`Money`] (i64 cents)
//! - **Validated policies**: targets sum to 1.0, no symbol claimed twice
//! - **Aliases**: holdings under alternate tickers fold into one canonical symbol
//! - **Explicit rounding**: half away from zero for trades, floor for deposit shares
//!
//! ## Quick Start
//!
//! ```
//! use fintilt::{AllocationEntry, AllocationPolicy, HoldingRecord, Money, aggregate, rebalance};
//!
//! let policy = AllocationPolicy::new(vec![
//!     AllocationEntry::new("VOO", 0.8),
//!     AllocationEntry::new("BND", 0.2),
//! ]).unwrap();
//!
//! let holdings = aggregate(&policy, [
//!     HoldingRecord::new("VOO", Money::parse("8000.00").unwrap()),
//!     HoldingRecord::new("BND", Money::parse("1000.00").unwrap()),
//! ]).unwrap();
//!
//! let report = rebalance(&policy, &holdings, Money::ZERO).unwrap();
//! assert_eq!(report.total, Money(9_000_00));
//! assert_eq!(report.entries[0].needed, Money(-800_00)); // sell VOO
//! assert_eq!(report.entries[1].needed, Money(800_00));  // buy BND
//! ```
//!
//! ## Money Representation
//!
//! ```
//! use fintilt::Money;
//!
//! let m = Money::parse("$1234.56").unwrap();
//! assert_eq!(m, Money(1234_56));
//! assert_eq!(Money::parse("$-12.34").unwrap(), Money(-1234));
//! assert_eq!(format!("{m}"), "$1234.56");
//! assert_eq!(format!("{m:#}"), "$1,234.56");
//! assert_eq!(Money(-1234).to_string(), "-$12.34");
//! ```
//!
//! ## Deposits
//!
//! ```
//! use fintilt::{AllocationEntry, AllocationPolicy, Money, allocate};
//!
//! let policy = AllocationPolicy::new(vec![
//!     AllocationEntry::new("A", 0.5),
//!     AllocationEntry::new("B", 0.5),
//! ]).unwrap();
//!
//! let split = allocate(&policy, Money(1_01));
//! assert_eq!(split.get("A"), Some(Money(50)));
//! assert_eq!(split.get("B"), Some(Money(50)));
//! assert_eq!(split.remainder, Money(1));
//! ```

pub mod deposit;
mod error;
pub mod holdings;
mod money;
pub mod policy;
pub mod rebalance;

// Re-export public API
pub use deposit::{DepositAllocation, allocate};
pub use error::{HoldingsError, ParseMoneyError, PolicyError, RebalanceError};
pub use holdings::{AggregatedHoldings, HoldingRecord, HoldingsAggregator, SymbolResolver, aggregate};
pub use money::Money;
pub use policy::{AllocationEntry, AllocationPolicy};
pub use rebalance::{DriftEntry, RebalanceReport, TradeAction, rebalance};
