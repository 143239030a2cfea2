//! Row-to-record extraction for the roster and the ledger.

pub mod ledger;
pub mod price;
pub mod roster;

pub use ledger::{extract_ledger, LedgerExtract};
pub use price::parse_price;
pub use roster::extract_members;

use crate::config::RoundingRule;
use crate::error::BillingError;
use crate::source::Row;

pub(crate) const ROSTER: &str = "roster";
pub(crate) const LEDGER: &str = "ledger";

/// Strip digit-group spaces and turn a decimal comma into a dot.
fn normalize_number(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}

fn invalid(table: &'static str, row: &Row<'_>, column: usize, value: &str) -> BillingError {
    BillingError::InvalidNumber {
        table,
        row: row.index(),
        column,
        value: value.to_string(),
    }
}

/// Parse a cell holding a decimal number (`1234.5`, `1 234,50`).
pub(crate) fn decimal_cell(
    table: &'static str,
    row: &Row<'_>,
    column: usize,
) -> Result<f64, BillingError> {
    let raw = row.text(column);
    match normalize_number(&raw).parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid(table, row, column, &raw)),
    }
}

/// Parse a decimal cell and round it to whole kronor.
pub(crate) fn amount_cell(
    table: &'static str,
    row: &Row<'_>,
    column: usize,
    rounding: RoundingRule,
) -> Result<i64, BillingError> {
    let value = decimal_cell(table, row, column)?;
    rounding
        .apply(value)
        .ok_or_else(|| invalid(table, row, column, &row.text(column)))
}

/// Parse a cell holding a whole number. Integral floats (`412.0`) are accepted
/// since spreadsheet readers often hand back every number as a float.
pub(crate) fn integer_cell(
    table: &'static str,
    row: &Row<'_>,
    column: usize,
) -> Result<i64, BillingError> {
    let raw = row.text(column);
    let normalized = normalize_number(&raw);
    if let Ok(v) = normalized.parse::<i64>() {
        return Ok(v);
    }
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < RoundingRule::MAX_AMOUNT => Ok(v as i64),
        _ => Err(invalid(table, row, column, &raw)),
    }
}
