// File I/O operations: load a roster or ledger into a grid, write notices out.

pub mod csv;
pub mod error;
pub mod sink;
pub mod xlsx;

use std::path::Path;

use powerbill_recon::Grid;

pub use error::IoError;
pub use sink::FileSink;

/// Load a table by file extension. `sheet` picks a worksheet in Excel/ODS
/// files (first sheet when `None`) and is ignored for delimited text.
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<Grid, IoError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => xlsx::import(path, sheet),
        "tsv" => csv::import_tsv(path),
        "csv" | "txt" => csv::import(path),
        _ => Err(IoError::UnsupportedFormat(path.to_path_buf())),
    }
}
