use log::debug;

use crate::config::RosterLayout;
use crate::error::BillingError;
use crate::extract::ROSTER;
use crate::model::{email_from_cell, Apartment, Member, Name};
use crate::source::{data_rows, CellSource, Row};

/// Turn roster rows into members, in roster order.
///
/// Rows with an empty name cell are separators and are skipped. Any malformed
/// row fails the whole extraction.
pub fn extract_members(
    source: &dyn CellSource,
    layout: &RosterLayout,
) -> Result<Vec<Member>, BillingError> {
    let rows = data_rows(source, ROSTER, layout.start_row, &layout.anchor)?;

    let mut members = Vec::new();
    for row in &rows {
        let raw_name = row.text(layout.name_col);
        if raw_name.trim().is_empty() {
            continue;
        }
        members.push(member_from_row(row, raw_name.trim(), layout)?);
    }

    debug!("roster: {} members from {} rows", members.len(), rows.len());
    Ok(members)
}

fn member_from_row(
    row: &Row<'_>,
    raw_name: &str,
    layout: &RosterLayout,
) -> Result<Member, BillingError> {
    let name = Name::parse(raw_name)?;
    let apartment = apartment_from_code(row, layout.apartment_col, raw_name)?;
    let email = email_from_cell(&row.text(layout.email_col));
    Ok(Member {
        name,
        apartment,
        email,
    })
}

/// The apartment is the second-to-last segment of an `A-B-C-D-E` code.
fn apartment_from_code(
    row: &Row<'_>,
    column: usize,
    raw_name: &str,
) -> Result<Apartment, BillingError> {
    let code = row.text(column);
    let segments: Vec<&str> = code.trim().split('-').collect();
    if segments.len() < 2 {
        return Err(BillingError::MissingApartment(raw_name.to_string()));
    }
    let segment = segments[segments.len() - 2].trim();
    segment.parse().map_err(|_| BillingError::InvalidNumber {
        table: ROSTER,
        row: row.index(),
        column,
        value: segment.to_string(),
    })
}
