use serde::Serialize;

use crate::engine::Reconciliation;
use crate::extract::LedgerExtract;
use crate::model::{Apartment, Channel, Member};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub meta: RunMeta,
    pub members: usize,
    pub ledger_records: usize,
    pub price: f64,
    pub email_notices: usize,
    pub print_notices: usize,
    pub combined_print_notices: usize,
    pub duplicate_emails_skipped: usize,
    pub orphaned_apartments: Vec<Apartment>,
    pub unbilled_apartments: Vec<Apartment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMeta {
    pub engine_version: String,
    pub run_at: String,
}

/// Compute summary statistics for a finished reconciliation.
pub fn compute_summary(
    members: &[Member],
    ledger: &LedgerExtract,
    recon: &Reconciliation,
) -> RunSummary {
    let count = |channel: Channel| recon.targets.iter().filter(|t| t.channel == channel).count();

    RunSummary {
        meta: RunMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        members: members.len(),
        ledger_records: ledger.records.len(),
        price: ledger.price,
        email_notices: count(Channel::Email),
        print_notices: count(Channel::Print),
        combined_print_notices: recon.combined_print_notices,
        duplicate_emails_skipped: recon.duplicate_emails_skipped,
        orphaned_apartments: recon.orphaned_apartments.clone(),
        unbilled_apartments: recon.unbilled_apartments.clone(),
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} members, {} ledger records at {} kr/kWh: {} email, {} print ({} combined), {} duplicate addresses skipped",
            self.members,
            self.ledger_records,
            crate::render::format_price(self.price),
            self.email_notices,
            self.print_notices,
            self.combined_print_notices,
            self.duplicate_emails_skipped,
        )?;
        if !self.orphaned_apartments.is_empty() {
            write!(f, ", {} orphaned apartments", self.orphaned_apartments.len())?;
        }
        if !self.unbilled_apartments.is_empty() {
            write!(f, ", {} unbilled apartments", self.unbilled_apartments.len())?;
        }
        Ok(())
    }
}
