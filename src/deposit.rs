//! Deposit allocation: split new money across symbols by target fraction.
//!
//! Each share is floored to whole cents so the shares never exceed the deposit.
//! Whatever is left over is returned as an explicit remainder; the caller
//! decides where it goes.

use crate::money::Money;
use crate::policy::AllocationPolicy;

/// Fixed-point scale for target fractions (nine decimal places).
const FRACTION_SCALE: i128 = 1_000_000_000;

/// A deposit split across policy symbols.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepositAllocation {
    pub deposit: Money,
    /// (canonical symbol, share) in policy order.
    pub shares: Vec<(String, Money)>,
    /// `deposit - sum(shares)`.
    pub remainder: Money,
}

impl DepositAllocation {
    pub fn get(&self, symbol: &str) -> Option<Money> {
        self.shares
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|&(_, m)| m)
    }

    /// Sum of all shares.
    pub fn allocated(&self) -> Money {
        self.shares.iter().map(|(_, m)| *m).sum()
    }
}

/// Target fraction as an integer count of `1 / FRACTION_SCALE` parts.
///
/// Policy validation bounds every target to `[0, 1]`, so the rounded product
/// lies in `[0, FRACTION_SCALE]` and the cast is exact.
fn fixed_parts(fraction: f64) -> i128 {
    (fraction * FRACTION_SCALE as f64).round() as i128
}

/// Split `deposit` across the policy's symbols.
///
/// Each share is `floor(deposit * fraction)`, with the fraction fixed to nine
/// decimal places so a target such as `0.3333` scales exactly instead of
/// flooring its binary approximation.
///
/// Targets may sum to a hair over 1.0 within the policy tolerance. Shares are
/// therefore clamped to what is left of the deposit, in policy order: a later
/// share can come out smaller than its floor, but the shares never exceed the
/// deposit in magnitude.
pub fn allocate(policy: &AllocationPolicy, deposit: Money) -> DepositAllocation {
    let whole = i128::from(deposit.cents());
    let mut allocated: i128 = 0;

    let shares: Vec<(String, Money)> = policy
        .entries()
        .iter()
        .map(|e| {
            let floor = (whole * fixed_parts(e.target)).div_euclid(FRACTION_SCALE);
            let left = whole - allocated;
            let cents = if whole >= 0 {
                floor.min(left)
            } else {
                floor.max(left)
            };
            allocated += cents;
            // between zero and the deposit, so within i64
            (e.symbol.clone(), Money(cents as i64))
        })
        .collect();

    DepositAllocation {
        deposit,
        shares,
        // allocated lies between zero and the deposit
        remainder: Money((whole - allocated) as i64),
    }
}
