//! Dollar amounts typed on the command line.
//!
//! Deposits are entered by hand, so unlike brokerage cells a bare number is
//! whole dollars: `1000` is $1,000.00. Group separators and a sign on either
//! side of `$` are accepted; at most two fraction digits are.

use fintilt::{Money, ParseMoneyError};

fn split_sign(s: &str) -> (bool, &str) {
    match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    }
}

/// Parse `1000`, `1,000.50`, `$12.5` or `-$3` as a dollar amount.
pub fn parse_dollars(input: &str) -> Result<Money, ParseMoneyError> {
    let invalid = || ParseMoneyError::new(input);

    let s = input.trim();
    let (mut negative, s) = split_sign(s);
    let s = s.strip_prefix('$').unwrap_or(s);
    let s = if negative {
        s
    } else {
        let (inner, rest) = split_sign(s);
        negative = inner;
        rest
    };

    let (whole, frac) = match s.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (s, None),
    };

    if whole.starts_with(',') || whole.ends_with(',') || whole.contains(",,") {
        return Err(invalid());
    }
    let digits: String = whole.chars().filter(|&c| c != ',').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let frac_cents: i128 = match frac {
        None => 0,
        Some(f) if f.is_empty() || f.len() > 2 => return Err(invalid()),
        Some(f) if !f.bytes().all(|b| b.is_ascii_digit()) => return Err(invalid()),
        Some(f) => {
            let value: i128 = f.parse().map_err(|_| invalid())?;
            if f.len() == 1 { value * 10 } else { value }
        }
    };

    let dollars: i128 = match (digits.is_empty(), frac) {
        (true, None) => return Err(invalid()),
        (true, Some(_)) => 0,
        // longer digit strings cannot fit in i64 cents anyway
        (false, _) if digits.len() > 20 => return Err(invalid()),
        (false, _) => digits.parse().map_err(|_| invalid())?,
    };

    let cents = dollars * 100 + frac_cents;
    let signed = if negative { -cents } else { cents };
    i64::try_from(signed).map(Money).map_err(|_| invalid())
}
