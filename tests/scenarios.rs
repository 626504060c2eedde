// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! End-to-end scenarios: parse → aggregate → rebalance / allocate.

use fintilt::{
    AllocationEntry, AllocationPolicy, HoldingRecord, HoldingsError, Money, PolicyError,
    RebalanceError, TradeAction, aggregate, allocate, rebalance,
};

fn voo_bnd() -> AllocationPolicy {
    AllocationPolicy::new(vec![
        AllocationEntry::new("VOO", 0.8).with_description("Vanguard S&P 500 ETF"),
        AllocationEntry::new("BND", 0.2).with_description("Vanguard Total Bond Market ETF"),
    ])
    .unwrap()
}

fn record(symbol: &str, amount: &str) -> HoldingRecord {
    HoldingRecord::new(symbol, Money::parse(amount).unwrap())
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Rebalance
// ============================================================================

#[test]
fn overweight_equity_sells_into_bonds() {
    let policy = voo_bnd();
    let holdings = aggregate(
        &policy,
        [record("VOO", "$8000.00"), record("BND", "$1000.00")],
    )
    .unwrap();
    let report = rebalance(&policy, &holdings, Money::ZERO).unwrap();

    assert_eq!(report.total, Money(9_000_00));
    assert_eq!(report.total.format(true), "$9,000.00");

    let voo = &report.entries[0];
    assert_eq!(voo.symbol, "VOO");
    assert_close(voo.current_pct, 88.89);
    assert_close(voo.drift, 8.89);
    assert_eq!(voo.needed, Money(-800_00));
    assert_eq!(voo.action(), TradeAction::Sell);

    let bnd = &report.entries[1];
    assert_close(bnd.current_pct, 11.11);
    assert_close(bnd.drift, -8.89);
    assert_eq!(bnd.needed, Money(800_00));
    assert_eq!(bnd.action(), TradeAction::Buy);
}

#[test]
fn fresh_deposit_into_empty_accounts() {
    let policy = voo_bnd();
    let holdings = aggregate(&policy, [record("VOO", "0.00"), record("BND", "0.00")]).unwrap();
    let report = rebalance(&policy, &holdings, Money::parse("1000.00").unwrap()).unwrap();

    assert_eq!(report.total, Money(1_000_00));
    assert_eq!(report.entries[0].drift, -80.0);
    assert_eq!(report.entries[0].needed, Money(800_00));
    assert_eq!(report.entries[1].drift, -20.0);
    assert_eq!(report.entries[1].needed, Money(200_00));
}

#[test]
fn empty_portfolio_without_deposit_fails() {
    let policy = voo_bnd();
    let holdings = aggregate(&policy, std::iter::empty()).unwrap();
    assert_eq!(
        rebalance(&policy, &holdings, Money::ZERO),
        Err(RebalanceError::ZeroTotal { total: Money::ZERO })
    );
}

#[test]
fn untracked_rows_are_invisible() {
    let policy = voo_bnd();
    let with_extra = aggregate(
        &policy,
        [
            record("VOO", "8000.00"),
            record("AAPL", "50000.00"),
            record("BND", "1000.00"),
        ],
    )
    .unwrap();
    let without =
        aggregate(&policy, [record("VOO", "8000.00"), record("BND", "1000.00")]).unwrap();

    let a = rebalance(&policy, &with_extra, Money::ZERO).unwrap();
    let b = rebalance(&policy, &without, Money::ZERO).unwrap();
    assert_eq!(a, b);
    assert!(a.entry("AAPL").is_none());
}

#[test]
fn aliases_across_accounts() {
    // Same fund held as ETF in a brokerage account and as mutual fund in an IRA
    let policy = AllocationPolicy::new(vec![
        AllocationEntry::new("VTI", 0.6).with_aliases(["VTSAX", "FSKAX"]),
        AllocationEntry::new("VXUS", 0.4).with_aliases(["VTIAX"]),
    ])
    .unwrap();
    let holdings = aggregate(
        &policy,
        [
            record("VTI", "3000.00"),
            record("VTSAX", "2000.00"),
            record("FSKAX", "1000.00"),
            record("VTIAX", "4000.00"),
        ],
    )
    .unwrap();
    let report = rebalance(&policy, &holdings, Money::ZERO).unwrap();

    assert_eq!(report.total, Money(10_000_00));
    assert_eq!(report.entry("VTI").unwrap().current, Money(6_000_00));
    assert_eq!(report.entry("VTI").unwrap().needed, Money::ZERO);
    assert_eq!(report.entry("VXUS").unwrap().needed, Money::ZERO);
}

#[test]
fn symbol_with_no_target_share_is_sold_off() {
    let policy = AllocationPolicy::new(vec![
        AllocationEntry::new("VTI", 1.0),
        AllocationEntry::new("GLD", 0.0),
    ])
    .unwrap();
    let holdings =
        aggregate(&policy, [record("VTI", "900.00"), record("GLD", "100.00")]).unwrap();
    let report = rebalance(&policy, &holdings, Money::ZERO).unwrap();
    assert_eq!(report.entry("GLD").unwrap().needed, Money(-100_00));
    assert_eq!(report.entry("VTI").unwrap().needed, Money(100_00));
}

#[test]
fn oversized_holdings_report_overflow() {
    let policy = AllocationPolicy::new(vec![
        AllocationEntry::new("A", 0.5),
        AllocationEntry::new("B", 0.5),
    ])
    .unwrap();
    let err = aggregate(
        &policy,
        [
            record("A", "50000000000000000.00"),
            record("B", "50000000000000000.00"),
        ],
    )
    .unwrap_err();
    assert!(matches!(err, HoldingsError::Overflow { ref symbol, .. } if symbol == "B"));

    let big = Money::parse("50000000000000000.00").unwrap();
    let holdings = aggregate(&policy, [HoldingRecord::new("A", big)]).unwrap();
    assert_eq!(
        rebalance(&policy, &holdings, big),
        Err(RebalanceError::Overflow {
            holdings: big,
            deposit: big,
        })
    );
}

// ============================================================================
// Deposit
// ============================================================================

#[test]
fn deposit_thirds() {
    let policy = AllocationPolicy::new(vec![
        AllocationEntry::new("A", 0.3333),
        AllocationEntry::new("B", 0.3333),
        AllocationEntry::new("C", 0.3334),
    ])
    .unwrap();
    let split = allocate(&policy, Money(10_000));

    assert_eq!(split.allocated(), Money(10_000));
    assert_eq!(split.remainder, Money::ZERO);
    assert_eq!(split.get("A"), Some(Money(3_333)));
    assert_eq!(split.get("C"), Some(Money(3_334)));
}

#[test]
fn deposit_share_is_floor_of_fraction() {
    // targets sum to 1.0 - 5e-10, inside the policy tolerance
    let policy = AllocationPolicy::new(vec![
        AllocationEntry::new("A", 0.25),
        AllocationEntry::new("B", 0.75 - 5e-10),
    ])
    .unwrap();
    let split = allocate(&policy, Money(123_456_789_01));
    assert_eq!(split.get("A"), Some(Money(30_864_197_25)));
    assert_eq!(split.remainder, split.deposit - split.allocated());
}

#[test]
fn deposit_matches_rebalance_of_empty_portfolio() {
    let policy = voo_bnd();
    let deposit = Money::parse("1234.56").unwrap();
    let split = allocate(&policy, deposit);
    let empty = aggregate(&policy, std::iter::empty()).unwrap();
    let report = rebalance(&policy, &empty, deposit).unwrap();

    for (symbol, share) in &split.shares {
        let needed = report.entry(symbol).unwrap().needed;
        assert!((needed - *share).cents().abs() <= 1);
    }
}

// ============================================================================
// Policy errors surface with context
// ============================================================================

#[test]
fn policy_errors_name_the_problem() {
    let err = AllocationPolicy::new(vec![
        AllocationEntry::new("VOO", 0.8),
        AllocationEntry::new("BND", 0.3),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("1.1"));

    let err = AllocationPolicy::new(vec![
        AllocationEntry::new("VOO", 0.5).with_aliases(["IVV"]),
        AllocationEntry::new("IVV", 0.5),
    ])
    .unwrap_err();
    assert!(matches!(err, PolicyError::DuplicateSymbol { .. }));
    let msg = err.to_string();
    assert!(msg.contains("IVV") && msg.contains("VOO"));
}

// ============================================================================
// Serialization
// ============================================================================

#[cfg(feature = "serde")]
#[test]
fn report_serializes_money_as_cents() {
    let policy = voo_bnd();
    let holdings = aggregate(&policy, [record("VOO", "80.00"), record("BND", "20.00")]).unwrap();
    let report = rebalance(&policy, &holdings, Money::ZERO).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["total"], 100_00);
    assert_eq!(json["entries"][0]["symbol"], "VOO");
    assert_eq!(json["entries"][0]["current"], 80_00);
}
