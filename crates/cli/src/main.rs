// powerbill CLI - electricity reconciliation notices from roster + ledger spreadsheets

mod billing;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use exit_codes::{billing_exit_code, io_exit_code, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "powerbill")]
#[command(about = "Turn a member roster and an electricity ledger into billing notices")]
#[command(version)]
struct Cli {
    /// Log extraction and reconciliation details to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate email and print notices
    #[command(after_help = "\
Examples:
  powerbill run --roster medlemmar.xlsx --ledger el2023.xlsx
  powerbill run --roster roster.csv --ledger ledger.csv --email-out mail.txt --print-out brev.txt
  powerbill run --roster roster.xlsx --ledger ledger.xlsx --layout layout.toml --json")]
    Run {
        #[command(flatten)]
        inputs: InputArgs,

        /// Destination for email notices (truncated at start)
        #[arg(long, default_value = "email.txt")]
        email_out: PathBuf,

        /// Destination for print notices (truncated at start)
        #[arg(long, default_value = "print.txt")]
        print_out: PathBuf,

        /// Print the run summary as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Suppress the human summary on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Extract and reconcile without writing notices
    #[command(after_help = "\
Examples:
  powerbill check --roster medlemmar.xlsx --ledger el2023.xlsx
  powerbill check --roster roster.csv --ledger ledger.csv --json")]
    Check {
        #[command(flatten)]
        inputs: InputArgs,

        /// Print the run summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Member roster (xlsx, xls, xlsb, ods, csv, tsv)
    #[arg(long)]
    roster: PathBuf,

    /// Electricity ledger (xlsx, xls, xlsb, ods, csv, tsv)
    #[arg(long)]
    ledger: PathBuf,

    /// Worksheet to read from the roster (default: first)
    #[arg(long)]
    roster_sheet: Option<String>,

    /// Worksheet to read from the ledger (default: first)
    #[arg(long)]
    ledger_sheet: Option<String>,

    /// TOML file overriding row/column positions and billing policy
    #[arg(long, env = "POWERBILL_LAYOUT")]
    layout: Option<PathBuf>,
}

pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
    /// Machine-readable error name, echoed as JSON on stderr under `--json`.
    pub kind: Option<&'static str>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None, kind: None }
    }

    pub fn billing(err: powerbill_recon::BillingError) -> Self {
        let hint = match &err {
            powerbill_recon::BillingError::StructuralAnchorMismatch { .. } => {
                Some("has the spreadsheet layout changed? adjust start_row in a --layout file".to_string())
            }
            powerbill_recon::BillingError::ReconciliationInconsistency { .. } => {
                Some("fix the ledger or roster; no notices were written".to_string())
            }
            _ => None,
        };
        Self {
            code: billing_exit_code(&err),
            message: err.to_string(),
            hint,
            kind: Some(exit_codes::billing_error_kind(&err)),
        }
    }

    pub fn io(err: powerbill_io::IoError) -> Self {
        Self { code: io_exit_code(&err), message: err.to_string(), hint: None, kind: Some("io_error") }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (result, json) = match cli.command {
        Commands::Run { inputs, email_out, print_out, json, quiet } => {
            (billing::cmd_run(&inputs, email_out, print_out, json, quiet), json)
        }
        Commands::Check { inputs, json } => (billing::cmd_check(&inputs, json), json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint, kind }) => {
            if json {
                let body = serde_json::json!({
                    "error": kind.unwrap_or("error"),
                    "message": message,
                    "exit_code": code,
                });
                eprintln!("{body}");
            } else {
                if !message.is_empty() {
                    eprintln!("error: {}", message);
                }
                if let Some(hint) = hint {
                    eprintln!("hint:  {}", hint);
                }
            }
            ExitCode::from(code)
        }
    }
}
