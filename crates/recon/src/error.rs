use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum BillingError {
    /// The row above the data range does not carry the expected label.
    StructuralAnchorMismatch {
        table: &'static str,
        row: usize,
        expected: String,
        found: String,
    },
    /// Name cell does not split into exactly `family, given`.
    MalformedName(String),
    /// Apartment code has fewer than two dash-separated segments. Carries the member name.
    MissingApartment(String),
    /// Price header cell lacks the `label: value unit` shape.
    PriceFormatError(String),
    /// Price value is not a finite, non-zero number.
    PriceParseError(String),
    /// A numeric cell could not be parsed.
    InvalidNumber {
        table: &'static str,
        row: usize,
        column: usize,
        value: String,
    },
    /// Roster and ledger disagree about an apartment.
    ReconciliationInconsistency { apartment: u32, reason: String },
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Layout validation error (zero column, missing anchor row, etc.).
    ConfigValidation(String),
}

impl BillingError {
    /// True for failures raised while turning rows into records.
    pub fn is_extraction(&self) -> bool {
        matches!(
            self,
            Self::StructuralAnchorMismatch { .. }
                | Self::MalformedName(_)
                | Self::MissingApartment(_)
                | Self::PriceFormatError(_)
                | Self::PriceParseError(_)
                | Self::InvalidNumber { .. }
        )
    }
}

impl fmt::Display for BillingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StructuralAnchorMismatch { table, row, expected, found } => write!(
                f,
                "{table}: expected '{expected}' in row {row}, column 1, found '{found}'"
            ),
            Self::MalformedName(raw) => {
                write!(f, "malformed name '{raw}' (expected 'family, given')")
            }
            Self::MissingApartment(name) => write!(f, "no apartment number in code for '{name}'"),
            Self::PriceFormatError(raw) => write!(f, "cannot find price in '{raw}'"),
            Self::PriceParseError(raw) => write!(f, "cannot parse price in '{raw}'"),
            Self::InvalidNumber { table, row, column, value } => write!(
                f,
                "{table}, row {row}, column {column}: cannot parse number '{value}'"
            ),
            Self::ReconciliationInconsistency { apartment, reason } => {
                write!(f, "apartment {apartment}: {reason}")
            }
            Self::ConfigParse(msg) => write!(f, "layout parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "layout validation error: {msg}"),
        }
    }
}

impl std::error::Error for BillingError {}
