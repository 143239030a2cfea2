//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                                     |
//! |------|-------------------------------------------------------------|
//! | 0    | Success                                                     |
//! | 1    | General error (unspecified)                                 |
//! | 2    | Usage error (bad args, invalid layout file)                 |
//! | 3    | Input could not be read (missing file, unknown sheet)       |
//! | 4    | Extraction failed (anchor, name, apartment, price, number)  |
//! | 5    | Roster and ledger are inconsistent                          |
//! | 6    | Notice files could not be written                           |

use powerbill_io::IoError;
use powerbill_recon::BillingError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments or an invalid layout file.
pub const EXIT_USAGE: u8 = 2;

/// Roster or ledger could not be opened or parsed as a table.
pub const EXIT_INPUT: u8 = 3;

/// A row could not be turned into a record. Nothing was written.
pub const EXIT_EXTRACT: u8 = 4;

/// Ledger and roster disagree (duplicate ledger rows, apartment without occupants).
pub const EXIT_INCONSISTENT: u8 = 5;

/// Email or print destination could not be written.
pub const EXIT_OUTPUT: u8 = 6;

pub fn billing_exit_code(err: &BillingError) -> u8 {
    match err {
        BillingError::ConfigParse(_) | BillingError::ConfigValidation(_) => EXIT_USAGE,
        BillingError::ReconciliationInconsistency { .. } => EXIT_INCONSISTENT,
        e if e.is_extraction() => EXIT_EXTRACT,
        _ => EXIT_ERROR,
    }
}

pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::Write { .. } => EXIT_OUTPUT,
        _ => EXIT_INPUT,
    }
}

/// Stable machine-readable name for a billing error.
pub fn billing_error_kind(err: &BillingError) -> &'static str {
    match err {
        BillingError::StructuralAnchorMismatch { .. } => "structural_anchor_mismatch",
        BillingError::MalformedName(_) => "malformed_name",
        BillingError::MissingApartment(_) => "missing_apartment",
        BillingError::PriceFormatError(_) => "price_format_error",
        BillingError::PriceParseError(_) => "price_parse_error",
        BillingError::InvalidNumber { .. } => "invalid_number",
        BillingError::ReconciliationInconsistency { .. } => "reconciliation_inconsistency",
        BillingError::ConfigParse(_) => "layout_parse_error",
        BillingError::ConfigValidation(_) => "layout_validation_error",
    }
}
