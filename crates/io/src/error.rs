use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum IoError {
    /// File could not be opened or decoded.
    Open { path: PathBuf, message: String },
    /// File opened but its content is malformed.
    Read { path: PathBuf, message: String },
    /// Extension not recognised as a spreadsheet or delimited text.
    UnsupportedFormat(PathBuf),
    /// Workbook has no worksheets.
    NoSheets(PathBuf),
    /// Requested worksheet does not exist.
    UnknownSheet { path: PathBuf, sheet: String, available: Vec<String> },
    /// Output destination could not be written.
    Write { path: PathBuf, message: String },
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, message } => write!(f, "cannot open {}: {message}", path.display()),
            Self::Read { path, message } => write!(f, "cannot read {}: {message}", path.display()),
            Self::UnsupportedFormat(path) => {
                write!(f, "unsupported file type: {}", path.display())
            }
            Self::NoSheets(path) => write!(f, "{} contains no sheets", path.display()),
            Self::UnknownSheet { path, sheet, available } => write!(
                f,
                "{} has no sheet '{sheet}' (available: {})",
                path.display(),
                available.join(", ")
            ),
            Self::Write { path, message } => {
                write!(f, "cannot write {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for IoError {}
