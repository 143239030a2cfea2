//! `powerbill run` / `powerbill check`: load both tables, reconcile, write notices.

use std::path::{Path, PathBuf};

use powerbill_io::{load_table, FileSink};
use powerbill_recon::{deliver, prepare, Batch, BillingLayout, NoticeSink, RunSummary};

use crate::{CliError, InputArgs};

fn load_layout(path: Option<&Path>) -> Result<BillingLayout, CliError> {
    let Some(path) = path else {
        return Ok(BillingLayout::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| {
        CliError::usage(format!("cannot read layout {}: {e}", path.display()))
    })?;
    BillingLayout::from_toml(&text).map_err(|e| {
        CliError::billing(e).with_hint(format!("check {}", path.display()))
    })
}

/// Extract and reconcile entirely in memory.
fn build_batch(inputs: &InputArgs) -> Result<Batch, CliError> {
    let layout = load_layout(inputs.layout.as_deref())?;
    let roster = load_table(&inputs.roster, inputs.roster_sheet.as_deref()).map_err(CliError::io)?;
    let ledger = load_table(&inputs.ledger, inputs.ledger_sheet.as_deref()).map_err(CliError::io)?;
    prepare(&roster, &ledger, &layout).map_err(CliError::billing)
}

fn report(summary: &RunSummary, json: bool, quiet: bool) -> Result<(), CliError> {
    if json {
        let json_str = serde_json::to_string_pretty(summary)
            .map_err(|e| CliError::usage(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }
    if !quiet {
        eprintln!("{summary}");
    }
    Ok(())
}

pub fn cmd_run(
    inputs: &InputArgs,
    email_out: PathBuf,
    print_out: PathBuf,
    json: bool,
    quiet: bool,
) -> Result<(), CliError> {
    // Destinations are emptied before any input is read; a failed run leaves them empty.
    let mut sink = FileSink::new(email_out, print_out);
    sink.reset().map_err(CliError::io)?;

    let batch = build_batch(inputs)?;
    deliver(&batch, &mut sink).map_err(CliError::io)?;

    report(&batch.summary, json, quiet)?;
    if !quiet && !json {
        eprintln!(
            "wrote {} and {}",
            sink.path(powerbill_recon::Channel::Email).display(),
            sink.path(powerbill_recon::Channel::Print).display()
        );
    }
    Ok(())
}

pub fn cmd_check(inputs: &InputArgs, json: bool) -> Result<(), CliError> {
    let batch = build_batch(inputs)?;
    report(&batch.summary, json, false)
}
