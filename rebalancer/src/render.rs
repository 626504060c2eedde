//! Terminal and JSON rendering of rebalance reports and deposit splits.
//!
//! Rendering never changes a number: every amount shown is the report's own
//! value passed through `Money` formatting.

use std::io::Write;

use clap::ValueEnum;
use colored::Colorize;
use fintilt::{AllocationPolicy, DepositAllocation, DriftEntry, Money, RebalanceReport};
use serde::Serialize;

use crate::error::Result;

/// Width of the separator line between report blocks.
const RULE_WIDTH: usize = 60;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// `+8.89%` in green when overweight, `-8.89%` in red otherwise.
fn drift_label(drift: f64) -> String {
    if drift > 0.0 {
        format!("+{drift:.2}%").green().to_string()
    } else {
        format!("{drift:.2}%").red().to_string()
    }
}

/// `+$800.00` in green when buying, red otherwise.
fn needed_label(needed: Money) -> String {
    if needed.is_positive() {
        format!("+{needed}").green().to_string()
    } else {
        needed.to_string().red().to_string()
    }
}

fn write_entry(out: &mut dyn Write, entry: &DriftEntry, description: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", rule())?;
    writeln!(
        out,
        "{} - {:.2}% ({})",
        entry.symbol,
        entry.current_pct,
        drift_label(entry.drift)
    )?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "{description}")?;
    writeln!(out, "Needed: {}", needed_label(entry.needed))?;
    writeln!(out, "Current Total: {:#}", entry.current)?;
    Ok(())
}

/// Per-symbol blocks in policy order, then the portfolio total.
pub fn write_report(
    out: &mut dyn Write,
    policy: &AllocationPolicy,
    report: &RebalanceReport,
) -> Result<()> {
    for entry in &report.entries {
        let description = policy
            .entry(&entry.symbol)
            .map_or("", |e| e.description.as_str());
        write_entry(out, entry, description)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", rule())?;
    if report.pending_deposit.is_zero() {
        writeln!(out, "Total: {:#}", report.total)?;
    } else {
        writeln!(
            out,
            "Total: {:#} (includes {:#} deposit)",
            report.total, report.pending_deposit
        )?;
    }
    Ok(())
}

/// One `SYMBOL: $X.YY` line per share, then any remainder.
pub fn write_allocation(out: &mut dyn Write, allocation: &DepositAllocation) -> Result<()> {
    for (symbol, share) in &allocation.shares {
        writeln!(out, "{symbol}: {share}")?;
    }
    if !allocation.remainder.is_zero() {
        writeln!(out, "Remainder: {}", allocation.remainder)?;
    }
    Ok(())
}

/// Pretty JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
