use serde::Serialize;

use crate::error::BillingError;

/// Apartment number: the join key between roster and ledger.
pub type Apartment = u32;

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Name {
    pub given: String,
    pub family: String,
}

impl Name {
    /// Parse a roster cell of the form `Family, Given`.
    pub fn parse(raw: &str) -> Result<Self, BillingError> {
        let parts: Vec<&str> = raw.split(',').collect();
        match parts.as_slice() {
            [family, given] => Ok(Self {
                given: given.trim().to_string(),
                family: family.trim().to_string(),
            }),
            _ => Err(BillingError::MalformedName(raw.to_string())),
        }
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.family.is_empty() {
            write!(f, "{}", self.given)
        } else {
            write!(f, "{} {}", self.given, self.family)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: Name,
    pub apartment: Apartment,
    pub email: Option<String>,
}

impl Member {
    /// One print recipient standing in for every occupant of an apartment.
    ///
    /// Given names are joined with `conjunction` in roster order; the family
    /// name is left empty and no email is carried.
    pub fn combined(occupants: &[&Member], apartment: Apartment, conjunction: &str) -> Self {
        let given = occupants
            .iter()
            .map(|m| m.name.given.as_str())
            .collect::<Vec<_>>()
            .join(conjunction);
        Self {
            name: Name {
                given,
                family: String::new(),
            },
            apartment,
            email: None,
        }
    }
}

/// Interpret a raw email cell. Empty and `-` mean "no address".
pub fn email_from_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectricityRecord {
    pub apartment: Apartment,
    /// kWh for the period.
    pub consumption: i64,
    pub paid_sum: i64,
    /// Price per kWh, shared by every record of a run.
    pub price: f64,
    /// Positive: owed by the occupant. Zero or negative: refunded.
    pub offset: i64,
}

// ---------------------------------------------------------------------------
// Reconciliation output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Print,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Print => write!(f, "print"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationTarget {
    pub recipient: Member,
    pub record: ElectricityRecord,
    pub channel: Channel,
}
