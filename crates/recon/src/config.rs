use serde::Deserialize;

use crate::error::BillingError;

// ---------------------------------------------------------------------------
// Top-level layout
// ---------------------------------------------------------------------------

/// Where things live in the two input tables, plus billing policy.
///
/// Every field has a default, so an empty TOML document is a valid layout.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BillingLayout {
    pub roster: RosterLayout,
    pub ledger: LedgerLayout,
    pub billing: BillingPolicy,
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterLayout {
    /// Label expected in column 1 of the row above `start_row`.
    pub anchor: String,
    pub start_row: usize,
    pub name_col: usize,
    /// Composite code `A-B-C-D-E`; the apartment is the second-to-last segment.
    pub apartment_col: usize,
    pub email_col: usize,
}

impl Default for RosterLayout {
    fn default() -> Self {
        Self {
            anchor: "Namn".into(),
            start_row: 8,
            name_col: 1,
            apartment_col: 2,
            email_col: 6,
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerLayout {
    pub anchor: String,
    pub start_row: usize,
    /// Header cell holding e.g. `Elkostnad 2023: 2,34 kr/kWh`.
    pub price_row: usize,
    pub price_col: usize,
    pub apartment_col: usize,
    pub consumption_col: usize,
    pub paid_col: usize,
    pub offset_col: usize,
}

impl Default for LedgerLayout {
    fn default() -> Self {
        Self {
            anchor: "Lägenhet".into(),
            start_row: 3,
            price_row: 1,
            price_col: 6,
            apartment_col: 1,
            consumption_col: 5,
            paid_col: 7,
            offset_col: 8,
        }
    }
}

// ---------------------------------------------------------------------------
// Billing policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BillingPolicy {
    pub rounding: RoundingRule,
    pub on_orphan_apartment: OrphanPolicy,
    /// Joins given names when several occupants share one print notice.
    pub conjunction: String,
}

impl Default for BillingPolicy {
    fn default() -> Self {
        Self {
            rounding: RoundingRule::default(),
            on_orphan_apartment: OrphanPolicy::default(),
            conjunction: " och ".into(),
        }
    }
}

/// How paid sums and offsets are rounded to whole kronor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingRule {
    /// 2.5 → 3, -2.5 → -3.
    #[default]
    HalfAwayFromZero,
    /// 2.5 → 2, 3.5 → 4.
    HalfEven,
}

impl RoundingRule {
    /// Largest magnitude accepted as a whole-kronor amount.
    pub const MAX_AMOUNT: f64 = 1e15;

    /// Round to whole kronor. `None` for non-finite or out-of-range values.
    pub fn apply(self, value: f64) -> Option<i64> {
        let rounded = match self {
            Self::HalfAwayFromZero => value.round(),
            Self::HalfEven => value.round_ties_even(),
        };
        (rounded.is_finite() && rounded.abs() < Self::MAX_AMOUNT).then_some(rounded as i64)
    }
}

/// What to do with a ledger apartment that nobody in the roster lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    #[default]
    Fail,
    /// Log a warning and report the apartment in the run summary.
    Skip,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl BillingLayout {
    pub fn from_toml(input: &str) -> Result<Self, BillingError> {
        let layout: BillingLayout =
            toml::from_str(input).map_err(|e| BillingError::ConfigParse(e.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), BillingError> {
        let r = &self.roster;
        let l = &self.ledger;

        let positions = [
            ("roster.start_row", r.start_row),
            ("roster.name_col", r.name_col),
            ("roster.apartment_col", r.apartment_col),
            ("roster.email_col", r.email_col),
            ("ledger.start_row", l.start_row),
            ("ledger.price_row", l.price_row),
            ("ledger.price_col", l.price_col),
            ("ledger.apartment_col", l.apartment_col),
            ("ledger.consumption_col", l.consumption_col),
            ("ledger.paid_col", l.paid_col),
            ("ledger.offset_col", l.offset_col),
        ];
        for (key, value) in positions {
            if value == 0 {
                return Err(BillingError::ConfigValidation(format!(
                    "{key} is 1-based and must be at least 1"
                )));
            }
        }

        // The anchor sits in the row above the data.
        if r.start_row < 2 {
            return Err(BillingError::ConfigValidation(
                "roster.start_row must be at least 2 (anchor row precedes data)".into(),
            ));
        }
        if l.start_row < 2 {
            return Err(BillingError::ConfigValidation(
                "ledger.start_row must be at least 2 (anchor row precedes data)".into(),
            ));
        }

        if r.anchor.trim().is_empty() || l.anchor.trim().is_empty() {
            return Err(BillingError::ConfigValidation("anchor labels must not be empty".into()));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
