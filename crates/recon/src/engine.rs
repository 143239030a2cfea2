use std::collections::{BTreeSet, HashMap, HashSet};

use log::{debug, warn};

use crate::config::{BillingPolicy, OrphanPolicy};
use crate::error::BillingError;
use crate::model::{Apartment, Channel, ElectricityRecord, Member, NotificationTarget};

/// Outcome of joining the roster against the ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Email targets first (ledger order), then print targets (ledger order).
    pub targets: Vec<NotificationTarget>,
    /// Members skipped because their address was already notified for the apartment.
    pub duplicate_emails_skipped: usize,
    /// Print notices standing in for more than one occupant.
    pub combined_print_notices: usize,
    /// Ledger apartments with nobody in the roster (only with [`OrphanPolicy::Skip`]).
    pub orphaned_apartments: Vec<Apartment>,
    /// Roster apartments that have no ledger record. They get no notice.
    pub unbilled_apartments: Vec<Apartment>,
}

/// Join members to ledger records by apartment.
///
/// Apartments where at least one member has an address get one email per
/// distinct address. All other apartments get exactly one print notice,
/// addressed to the sole occupant or to a combined recipient.
pub fn reconcile(
    members: &[Member],
    records: &[ElectricityRecord],
    policy: &BillingPolicy,
) -> Result<Reconciliation, BillingError> {
    check_one_record_per_apartment(records)?;

    // Occupants per apartment, roster order preserved within each.
    let mut occupants: HashMap<Apartment, Vec<&Member>> = HashMap::new();
    for member in members {
        occupants.entry(member.apartment).or_default().push(member);
    }

    let mut out = Reconciliation::default();
    let mut pending: Vec<&ElectricityRecord> = Vec::new();

    for record in records {
        let with_email: Vec<&Member> = occupants
            .get(&record.apartment)
            .map(|ms| ms.iter().copied().filter(|m| m.email.is_some()).collect())
            .unwrap_or_default();

        if with_email.is_empty() {
            pending.push(record);
            continue;
        }

        let mut notified: HashSet<&str> = HashSet::new();
        for member in with_email {
            let Some(email) = member.email.as_deref() else {
                continue;
            };
            if !notified.insert(email) {
                debug!("apartment {}: {email} already notified", record.apartment);
                out.duplicate_emails_skipped += 1;
                continue;
            }
            out.targets.push(NotificationTarget {
                recipient: member.clone(),
                record: record.clone(),
                channel: Channel::Email,
            });
        }
    }

    for record in pending {
        let residents = occupants
            .get(&record.apartment)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let recipient = match residents {
            [] => match policy.on_orphan_apartment {
                OrphanPolicy::Fail => {
                    return Err(BillingError::ReconciliationInconsistency {
                        apartment: record.apartment,
                        reason: "billed in the ledger but has no roster members".into(),
                    })
                }
                OrphanPolicy::Skip => {
                    warn!(
                        "apartment {} is billed but has no roster members; no notice",
                        record.apartment
                    );
                    out.orphaned_apartments.push(record.apartment);
                    continue;
                }
            },
            [only] => (*only).clone(),
            several => {
                out.combined_print_notices += 1;
                Member::combined(several, record.apartment, &policy.conjunction)
            }
        };

        out.targets.push(NotificationTarget {
            recipient,
            record: record.clone(),
            channel: Channel::Print,
        });
    }

    let billed: HashSet<Apartment> = records.iter().map(|r| r.apartment).collect();
    let unbilled: BTreeSet<Apartment> = members
        .iter()
        .map(|m| m.apartment)
        .filter(|a| !billed.contains(a))
        .collect();
    for apartment in &unbilled {
        warn!("apartment {apartment} has roster members but no ledger record; no notice");
    }
    out.unbilled_apartments = unbilled.into_iter().collect();

    Ok(out)
}

fn check_one_record_per_apartment(records: &[ElectricityRecord]) -> Result<(), BillingError> {
    let mut counts: HashMap<Apartment, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.apartment).or_insert(0) += 1;
    }
    // Report in ledger order so the error is stable.
    for record in records {
        let count = counts[&record.apartment];
        if count != 1 {
            return Err(BillingError::ReconciliationInconsistency {
                apartment: record.apartment,
                reason: format!("expected exactly one ledger record, found {count}"),
            });
        }
    }
    Ok(())
}
