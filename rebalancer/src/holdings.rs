//! Brokerage CSV reader: streams position rows into a holdings aggregator.
//!
//! Exports differ in layout, so columns are located by header name. Brokerage
//! files also tend to carry footer lines (disclaimers, "Pending Activity"
//! rows) that are not positions; rows too short to hold both columns are
//! skipped, and rows for untracked symbols are dropped before their amount is
//! parsed.

use std::io::Read;
use std::path::Path;

use fintilt::{AggregatedHoldings, HoldingsAggregator, Money, SymbolResolver};
use log::{debug, info};

use crate::config::CsvConfig;
use crate::error::{Error, Result};

/// Read every holding row from `reader` into `aggregator`.
///
/// Returns the number of rows skipped as malformed (too few fields).
pub fn read_holdings<R, S>(
    reader: R,
    columns: &CsvConfig,
    aggregator: &mut HoldingsAggregator<S>,
) -> Result<usize>
where
    R: Read,
    S: SymbolResolver,
{
    let mut csv = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| Error::MissingColumn {
                column: name.to_string(),
            })
    };
    let symbol_idx = find(&columns.symbol_column)?;
    let amount_idx = find(&columns.amount_column)?;

    let mut skipped = 0;
    for row in csv.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line());

        let (Some(symbol), Some(amount)) = (row.get(symbol_idx), row.get(amount_idx)) else {
            debug!("line {line}: skipping row with {} fields", row.len());
            skipped += 1;
            continue;
        };
        let symbol = symbol.trim();

        if !aggregator.tracks(symbol) {
            debug!("line {line}: ignoring untracked symbol {symbol:?}");
            aggregator.skip();
            continue;
        }

        let amount = Money::parse(amount.trim()).map_err(|source| Error::Amount {
            line,
            symbol: symbol.to_string(),
            source,
        })?;
        aggregator.push(symbol, amount)?;
    }

    Ok(skipped)
}

/// Read and aggregate a holdings CSV file.
pub fn load_holdings<S: SymbolResolver>(
    path: &Path,
    columns: &CsvConfig,
    resolver: S,
) -> Result<AggregatedHoldings> {
    let file = std::fs::File::open(path).map_err(|e| Error::HoldingsRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut aggregator = HoldingsAggregator::new(resolver);
    let skipped = read_holdings(file, columns, &mut aggregator)?;
    let holdings = aggregator.finish();

    info!(
        "read {}: {} tracked rows, {} untracked, {} malformed",
        path.display(),
        holdings.accepted(),
        holdings.dropped(),
        skipped
    );
    Ok(holdings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintilt::{AllocationEntry, AllocationPolicy};

    fn policy() -> AllocationPolicy {
        AllocationPolicy::new(vec![
            AllocationEntry::new("VOO", 0.8).with_aliases(["FXAIX"]),
            AllocationEntry::new("BND", 0.2),
        ])
        .unwrap()
    }

    fn read(csv: &str) -> Result<(AggregatedHoldings, usize)> {
        let policy = policy();
        let mut aggregator = HoldingsAggregator::new(&policy);
        let skipped = read_holdings(csv.as_bytes(), &CsvConfig::default(), &mut aggregator)?;
        Ok((aggregator.finish(), skipped))
    }

    #[test]
    fn brokerage_export() {
        let csv = "\
Account Number,Account Name,Symbol,Description,Quantity,Last Price,Current Value
X1,Individual,VOO,VANGUARD S&P 500,10,$500.00,$5000.00
X1,Individual,SPAXX**,HELD IN MONEY MARKET,,,$120.55
X2,Roth IRA,FXAIX,FIDELITY 500 INDEX,20,$150.00,$3000.00
X2,Roth IRA,BND,VANGUARD TOTAL BOND,14,$71.43,$1000.02
X2,Roth IRA,Pending Activity,,,,--
\"The data and information in this spreadsheet is provided to you solely for your use\"
\"Brokerage services are provided by Example Brokerage LLC\"
";
        let (holdings, skipped) = read(csv).unwrap();
        assert_eq!(holdings.get("VOO"), Money(8_000_00));
        assert_eq!(holdings.get("BND"), Money(1_000_02));
        assert_eq!(holdings.total(), Money(9_000_02));
        assert_eq!(holdings.dropped(), 2);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn columns_found_in_any_position() {
        let csv = "Current Value,Symbol\n$10.00,BND\n";
        let (holdings, _) = read(csv).unwrap();
        assert_eq!(holdings.get("BND"), Money(10_00));
    }

    #[test]
    fn custom_column_names() {
        let policy = policy();
        let columns = CsvConfig {
            symbol_column: "Ticker".into(),
            amount_column: "Market Value".into(),
        };
        let mut aggregator = HoldingsAggregator::new(&policy);
        read_holdings(
            "Ticker,Market Value\nVOO,1.00\n".as_bytes(),
            &columns,
            &mut aggregator,
        )
        .unwrap();
        assert_eq!(aggregator.finish().get("VOO"), Money(1_00));
    }

    #[test]
    fn missing_column() {
        let err = read("Symbol,Quantity\nVOO,3\n").unwrap_err();
        match err {
            Error::MissingColumn { column } => assert_eq!(column, "Current Value"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_has_no_columns() {
        assert!(matches!(read(""), Err(Error::MissingColumn { .. })));
    }

    #[test]
    fn bad_amount_on_tracked_row_is_fatal() {
        let err = read("Symbol,Current Value\nBND,$10.00\nVOO,n/a\n").unwrap_err();
        match &err {
            Error::Amount { line, symbol, .. } => {
                assert_eq!(*line, 3);
                assert_eq!(symbol, "VOO");
            }
            other => panic!("expected Amount, got {other:?}"),
        }
        assert!(err.to_string().contains("n/a"));
    }

    #[test]
    fn bad_amount_on_untracked_row_is_ignored() {
        let (holdings, _) = read("Symbol,Current Value\nQQQ,n/a\nBND,$1.00\n").unwrap();
        assert_eq!(holdings.total(), Money(1_00));
        assert_eq!(holdings.dropped(), 1);
    }

    #[test]
    fn symbols_and_amounts_are_trimmed() {
        let (holdings, _) = read("Symbol,Current Value\n  BND , $2.50 \n").unwrap();
        assert_eq!(holdings.get("BND"), Money(2_50));
    }

    #[test]
    fn amounts_use_dollars_and_cents() {
        let (holdings, _) = read("Symbol,Current Value\nVOO,$-12.34\nBND,1000\n").unwrap();
        assert_eq!(holdings.get("VOO"), Money(-12_34));
        // no fraction digits: read as cents
        assert_eq!(holdings.get("BND"), Money(10_00));

        let err = read("Symbol,Current Value\nVOO,\"$1,234.56\"\n").unwrap_err();
        assert!(matches!(err, Error::Amount { line: 2, .. }));
    }

    #[test]
    fn oversized_total_is_an_error() {
        let csv = "\
Symbol,Current Value
VOO,$50000000000000000.00
BND,$50000000000000000.00
";
        let err = read(csv).unwrap_err();
        assert!(matches!(err, Error::Holdings(_)));
        assert!(err.to_string().contains("BND"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("positions.csv");
        std::fs::write(&path, "Symbol,Current Value\nVOO,$8000.00\nBND,$1000.00\n").unwrap();

        let holdings = load_holdings(&path, &CsvConfig::default(), &policy()).unwrap();
        assert_eq!(holdings.total(), Money(9_000_00));
    }

    #[test]
    fn load_missing_file() {
        let err = load_holdings(
            Path::new("/nonexistent/positions.csv"),
            &CsvConfig::default(),
            &policy(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::HoldingsRead { .. }));
    }
}
