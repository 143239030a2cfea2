use log::debug;

use crate::config::{LedgerLayout, RoundingRule};
use crate::error::BillingError;
use crate::extract::price::parse_price;
use crate::extract::{amount_cell, integer_cell, LEDGER};
use crate::model::ElectricityRecord;
use crate::source::{data_rows, CellSource, Row};

/// Ledger records plus the price they were billed at.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerExtract {
    pub price: f64,
    pub records: Vec<ElectricityRecord>,
}

/// Read the price header and every non-empty ledger row.
///
/// All-or-nothing: the first unparsable cell aborts the extraction.
pub fn extract_ledger(
    source: &dyn CellSource,
    layout: &LedgerLayout,
    rounding: RoundingRule,
) -> Result<LedgerExtract, BillingError> {
    let rows = data_rows(source, LEDGER, layout.start_row, &layout.anchor)?;
    let price = parse_price(&source.text(layout.price_row, layout.price_col))?;

    let mut records = Vec::new();
    for row in &rows {
        if row.text(layout.apartment_col).trim().is_empty() {
            continue;
        }
        records.push(record_from_row(row, layout, rounding, price)?);
    }

    debug!(
        "ledger: {} records from {} rows, price {price}",
        records.len(),
        rows.len()
    );
    Ok(LedgerExtract { price, records })
}

fn record_from_row(
    row: &Row<'_>,
    layout: &LedgerLayout,
    rounding: RoundingRule,
    price: f64,
) -> Result<ElectricityRecord, BillingError> {
    let apartment = integer_cell(LEDGER, row, layout.apartment_col)?;
    let apartment = u32::try_from(apartment).map_err(|_| BillingError::InvalidNumber {
        table: LEDGER,
        row: row.index(),
        column: layout.apartment_col,
        value: row.text(layout.apartment_col),
    })?;

    Ok(ElectricityRecord {
        apartment,
        consumption: integer_cell(LEDGER, row, layout.consumption_col)?,
        paid_sum: amount_cell(LEDGER, row, layout.paid_col, rounding)?,
        price,
        offset: amount_cell(LEDGER, row, layout.offset_col, rounding)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Grid;

    /// apartment, consumption, paid, offset
    fn ledger(price_text: &str, rows: &[(&str, &str, &str, &str)]) -> Grid {
        let mut g = Grid::new();
        g.set(1, 1, "Elavräkning");
        g.set(1, 6, price_text);
        g.set(2, 1, "Lägenhet");
        for (i, (apt, kwh, paid, offset)) in rows.iter().enumerate() {
            let r = 3 + i;
            g.set(r, 1, *apt);
            g.set(r, 5, *kwh);
            g.set(r, 7, *paid);
            g.set(r, 8, *offset);
        }
        g
    }

    #[test]
    fn extracts_records_with_shared_price() {
        let g = ledger(
            "Elkostnad 2023: 2,34 kr/kWh",
            &[
                ("12", "1500", "3360.4", "150.2"),
                ("", "", "", ""),
                ("13", "800", "1950", "-75,4"),
            ],
        );
        let out = extract_ledger(&g, &LedgerLayout::default(), RoundingRule::default()).unwrap();
        assert_eq!(out.price, 2.34);
        assert_eq!(out.records.len(), 2);
        assert_eq!(
            out.records[0],
            ElectricityRecord {
                apartment: 12,
                consumption: 1500,
                paid_sum: 3360,
                price: 2.34,
                offset: 150,
            }
        );
        assert_eq!(out.records[1].apartment, 13);
        assert_eq!(out.records[1].offset, -75);
        assert_eq!(out.records[1].price, 2.34);
    }

    #[test]
    fn rounding_rule_is_applied() {
        let g = ledger("Elkostnad: 2,00 kr", &[("12", "10", "20.5", "-0.5")]);
        let away = extract_ledger(&g, &LedgerLayout::default(), RoundingRule::HalfAwayFromZero)
            .unwrap();
        assert_eq!((away.records[0].paid_sum, away.records[0].offset), (21, -1));
        let even = extract_ledger(&g, &LedgerLayout::default(), RoundingRule::HalfEven).unwrap();
        assert_eq!((even.records[0].paid_sum, even.records[0].offset), (20, 0));
    }

    #[test]
    fn bad_price_aborts() {
        let g = ledger("Elkostnad 2023", &[("12", "10", "20", "0")]);
        assert!(matches!(
            extract_ledger(&g, &LedgerLayout::default(), RoundingRule::default()),
            Err(BillingError::PriceFormatError(_))
        ));
    }

    #[test]
    fn bad_cell_aborts_without_partial_result() {
        let g = ledger(
            "Elkostnad: 2,34 kr",
            &[("12", "10", "20", "0"), ("13", "lots", "20", "0")],
        );
        assert_eq!(
            extract_ledger(&g, &LedgerLayout::default(), RoundingRule::default()),
            Err(BillingError::InvalidNumber {
                table: "ledger",
                row: 4,
                column: 5,
                value: "lots".into(),
            })
        );
    }

    #[test]
    fn huge_amount_is_rejected_not_clamped() {
        let g = ledger("Elkostnad: 2,34 kr", &[("12", "10", "1e30", "0")]);
        assert_eq!(
            extract_ledger(&g, &LedgerLayout::default(), RoundingRule::default()),
            Err(BillingError::InvalidNumber {
                table: "ledger",
                row: 3,
                column: 7,
                value: "1e30".into(),
            })
        );

        let g = ledger("Elkostnad: 2,34 kr", &[("12", "10", "20", "-1e30")]);
        assert!(matches!(
            extract_ledger(&g, &LedgerLayout::default(), RoundingRule::HalfEven),
            Err(BillingError::InvalidNumber { column: 8, .. })
        ));
    }

    #[test]
    fn negative_apartment_rejected() {
        let g = ledger("Elkostnad: 2,34 kr", &[("-4", "10", "20", "0")]);
        assert!(matches!(
            extract_ledger(&g, &LedgerLayout::default(), RoundingRule::default()),
            Err(BillingError::InvalidNumber { column: 1, .. })
        ));
    }

    #[test]
    fn missing_anchor_checked_before_price() {
        let mut g = ledger("no price here", &[]);
        g.set(2, 1, "Lgh");
        assert!(matches!(
            extract_ledger(&g, &LedgerLayout::default(), RoundingRule::default()),
            Err(BillingError::StructuralAnchorMismatch { .. })
        ));
    }
}
