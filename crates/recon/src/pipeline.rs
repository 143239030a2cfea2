//! One billing run: extract both tables, reconcile, render, then hand the
//! notices to a sink.
//!
//! [`prepare`] does all the work in memory, so a sink is only written to
//! once every record has been validated.

use std::convert::Infallible;

use log::info;

use crate::config::BillingLayout;
use crate::engine::reconcile;
use crate::error::BillingError;
use crate::extract::{extract_ledger, extract_members};
use crate::model::{Apartment, Channel};
use crate::render::render;
use crate::source::CellSource;
use crate::summary::{compute_summary, RunSummary};

/// Written after every notice so destinations read as blank-line separated blocks.
pub const NOTICE_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub channel: Channel,
    pub apartment: Apartment,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Batch {
    pub notices: Vec<Notice>,
    pub summary: RunSummary,
}

pub fn prepare(
    roster: &dyn CellSource,
    ledger: &dyn CellSource,
    layout: &BillingLayout,
) -> Result<Batch, BillingError> {
    let members = extract_members(roster, &layout.roster)?;
    let extract = extract_ledger(ledger, &layout.ledger, layout.billing.rounding)?;
    let recon = reconcile(&members, &extract.records, &layout.billing)?;

    let notices = recon
        .targets
        .iter()
        .map(|t| Notice {
            channel: t.channel,
            apartment: t.record.apartment,
            text: render(t),
        })
        .collect();
    let summary = compute_summary(&members, &extract, &recon);

    info!(
        "prepared {} email and {} print notices",
        summary.email_notices, summary.print_notices
    );
    Ok(Batch { notices, summary })
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Two append-only destinations, one per channel.
pub trait NoticeSink {
    type Error;

    /// Empty both destinations.
    fn reset(&mut self) -> Result<(), Self::Error>;

    fn append(&mut self, channel: Channel, text: &str) -> Result<(), Self::Error>;
}

/// Append every notice in engine order. The sink is expected to be reset
/// already, at the start of the run.
pub fn deliver<S: NoticeSink>(batch: &Batch, sink: &mut S) -> Result<(), S::Error> {
    for notice in &batch.notices {
        sink.append(notice.channel, &notice.text)?;
        sink.append(notice.channel, NOTICE_SEPARATOR)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    pub email: String,
    pub print: String,
}

impl NoticeSink for MemorySink {
    type Error = Infallible;

    fn reset(&mut self) -> Result<(), Infallible> {
        self.email.clear();
        self.print.clear();
        Ok(())
    }

    fn append(&mut self, channel: Channel, text: &str) -> Result<(), Infallible> {
        match channel {
            Channel::Email => self.email.push_str(text),
            Channel::Print => self.print.push_str(text),
        }
        Ok(())
    }
}
