//! Command workflows: config + inputs → core calculation → rendered output.

use std::io::Write;
use std::path::Path;

use fintilt::{AllocationPolicy, DepositAllocation, Money, RebalanceReport};
use log::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::holdings;
use crate::render::{self, OutputFormat};

fn check_deposit(amount: Money) -> Result<()> {
    if amount.is_negative() {
        return Err(Error::NegativeDeposit(amount));
    }
    Ok(())
}

/// Compute the drift report for a holdings CSV plus an optional pending deposit.
pub fn plan_rebalance(
    config: &Config,
    policy: &AllocationPolicy,
    holdings_path: &Path,
    deposit: Money,
) -> Result<RebalanceReport> {
    check_deposit(deposit)?;
    let holdings = holdings::load_holdings(holdings_path, &config.csv, policy)?;
    let report = fintilt::rebalance(policy, &holdings, deposit)?;
    info!(
        "total {:#} across {} symbols ({} to buy, {} to sell)",
        report.total,
        report.entries.len(),
        report.buys().count(),
        report.sells().count()
    );
    Ok(report)
}

/// Split a deposit across the policy.
pub fn plan_deposit(policy: &AllocationPolicy, amount: Money) -> Result<DepositAllocation> {
    check_deposit(amount)?;
    let allocation = fintilt::allocate(policy, amount);
    info!(
        "allocated {:#} of {:#}, remainder {}",
        allocation.allocated(),
        amount,
        allocation.remainder
    );
    Ok(allocation)
}

/// `rebalance` subcommand.
pub fn run_rebalance(
    config: &Config,
    holdings_path: &Path,
    deposit: Money,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let policy = config.policy()?;
    let report = plan_rebalance(config, &policy, holdings_path, deposit)?;
    match format {
        OutputFormat::Text => render::write_report(out, &policy, &report),
        OutputFormat::Json => render::write_json(out, &report),
    }
}

/// `deposit` subcommand.
pub fn run_deposit(
    config: &Config,
    amount: Money,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let policy = config.policy()?;
    let allocation = plan_deposit(&policy, amount)?;
    match format {
        OutputFormat::Text => render::write_allocation(out, &allocation),
        OutputFormat::Json => render::write_json(out, &allocation),
    }
}
