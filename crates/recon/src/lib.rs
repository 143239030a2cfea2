//! `powerbill-recon`: roster/ledger extraction and billing-notice reconciliation.
//!
//! Pure engine crate: reads cells through [`CellSource`], returns rendered
//! notices tagged by channel. No spreadsheet-format or file-system dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod summary;

pub use config::BillingLayout;
pub use engine::{reconcile, Reconciliation};
pub use error::BillingError;
pub use model::{Channel, ElectricityRecord, Member, Name, NotificationTarget};
pub use pipeline::{deliver, prepare, Batch, MemorySink, Notice, NoticeSink};
pub use source::{CellSource, Grid};
pub use summary::RunSummary;
