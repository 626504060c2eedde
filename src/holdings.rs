//! Holdings aggregation: per-symbol totals from raw (symbol, amount) records.
//!
//! Symbols are resolved to their canonical form through a [`SymbolResolver`].
//! Records whose symbol does not resolve are dropped: they are assets outside
//! the tracked allocation and count toward neither a symbol nor the total.
//!
//! # Example
//!
//! ```
//! use fintilt::{AllocationEntry, AllocationPolicy, HoldingRecord, Money, aggregate};
//!
//! let policy = AllocationPolicy::new(vec![
//!     AllocationEntry::new("VTI", 1.0).with_aliases(["VTSAX"]),
//! ]).unwrap();
//!
//! let holdings = aggregate(&policy, [
//!     HoldingRecord::new("VTI", Money(100_00)),
//!     HoldingRecord::new("VTSAX", Money(50_00)),
//!     HoldingRecord::new("AAPL", Money(999_00)),
//! ]).unwrap();
//!
//! assert_eq!(holdings.get("VTI"), Money(150_00));
//! assert_eq!(holdings.total(), Money(150_00));
//! assert_eq!(holdings.dropped(), 1);
//! ```

use rustc_hash::FxHashMap;

use crate::error::HoldingsError;
use crate::money::Money;
use crate::policy::AllocationPolicy;

/// Maps any accepted symbol to the canonical symbol it aggregates under.
pub trait SymbolResolver {
    /// Canonical symbol for `symbol`, or `None` if it is not tracked.
    fn resolve(&self, symbol: &str) -> Option<&str>;
}

impl SymbolResolver for AllocationPolicy {
    fn resolve(&self, symbol: &str) -> Option<&str> {
        self.canonical(symbol)
    }
}

/// Plain alias map: symbol → canonical symbol.
impl SymbolResolver for FxHashMap<String, String> {
    fn resolve(&self, symbol: &str) -> Option<&str> {
        self.get(symbol).map(String::as_str)
    }
}

impl<R: SymbolResolver + ?Sized> SymbolResolver for &R {
    fn resolve(&self, symbol: &str) -> Option<&str> {
        (**self).resolve(symbol)
    }
}

/// One input row: a symbol and its current value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoldingRecord {
    pub symbol: String,
    pub amount: Money,
}

impl HoldingRecord {
    pub fn new(symbol: impl Into<String>, amount: Money) -> Self {
        Self {
            symbol: symbol.into(),
            amount,
        }
    }
}

/// Summed holdings per canonical symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregatedHoldings {
    totals: FxHashMap<String, Money>,
    total: Money,
    accepted: usize,
    dropped: usize,
}

impl AggregatedHoldings {
    /// Total held under `symbol`; zero if nothing was aggregated for it.
    pub fn get(&self, symbol: &str) -> Money {
        self.totals.get(symbol).copied().unwrap_or(Money::ZERO)
    }

    /// Sum over all tracked symbols.
    pub fn total(&self) -> Money {
        self.total
    }

    /// (canonical symbol, total) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.totals.iter().map(|(s, &m)| (s.as_str(), m))
    }

    /// Number of distinct canonical symbols seen.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Records that resolved to a tracked symbol.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Records dropped because their symbol was not tracked.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Streaming aggregator: push records one at a time, then [`finish`](Self::finish).
pub struct HoldingsAggregator<R> {
    resolver: R,
    holdings: AggregatedHoldings,
}

impl<R: SymbolResolver> HoldingsAggregator<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            holdings: AggregatedHoldings::default(),
        }
    }

    /// Whether records for `symbol` would be kept.
    pub fn tracks(&self, symbol: &str) -> bool {
        self.resolver.resolve(symbol).is_some()
    }

    /// Add one holding. Returns `Ok(false)` if the symbol is untracked and was dropped.
    ///
    /// # Errors
    ///
    /// [`HoldingsError::Overflow`] if the symbol's total or the portfolio total
    /// would leave the `i64` cent range. Nothing is recorded in that case.
    pub fn push(&mut self, symbol: &str, amount: Money) -> Result<bool, HoldingsError> {
        let Some(canonical) = self.resolver.resolve(symbol) else {
            self.holdings.dropped += 1;
            return Ok(false);
        };

        let overflow = || HoldingsError::Overflow {
            symbol: symbol.to_string(),
            amount,
        };
        let held = self.holdings.get(canonical);
        let symbol_total = held.checked_add(amount).ok_or_else(overflow)?;
        let total = self.holdings.total.checked_add(amount).ok_or_else(overflow)?;

        match self.holdings.totals.get_mut(canonical) {
            Some(slot) => *slot = symbol_total,
            None => {
                self.holdings.totals.insert(canonical.to_string(), symbol_total);
            }
        }
        self.holdings.total = total;
        self.holdings.accepted += 1;
        Ok(true)
    }

    pub fn push_record(&mut self, record: &HoldingRecord) -> Result<bool, HoldingsError> {
        self.push(&record.symbol, record.amount)
    }

    /// Count one record as dropped without looking at its amount.
    pub fn skip(&mut self) {
        self.holdings.dropped += 1;
    }

    /// Holdings aggregated so far.
    pub fn holdings(&self) -> &AggregatedHoldings {
        &self.holdings
    }

    pub fn finish(self) -> AggregatedHoldings {
        self.holdings
    }
}

/// Aggregate a batch of records under `resolver`.
pub fn aggregate<R, I>(resolver: R, records: I) -> Result<AggregatedHoldings, HoldingsError>
where
    R: SymbolResolver,
    I: IntoIterator<Item = HoldingRecord>,
{
    let mut aggregator = HoldingsAggregator::new(resolver);
    for record in records {
        aggregator.push_record(&record)?;
    }
    Ok(aggregator.finish())
}
