//! Text-only cell access over a tabular source.
//!
//! Rows and columns are 1-based, so `(1, 1)` is cell A1. Every read returns
//! text; parsing numbers is the extractors' job.

use crate::error::BillingError;

/// The one capability extraction needs from a spreadsheet: read a cell as text.
pub trait CellSource {
    /// Number of rows, counting from row 1 to the last populated row.
    fn row_count(&self) -> usize;

    /// Text of a cell. Cells outside the populated area read as `""`.
    fn text(&self, row: usize, col: usize) -> String;
}

/// A single row of a [`CellSource`].
#[derive(Clone, Copy)]
pub struct Row<'a> {
    source: &'a dyn CellSource,
    index: usize,
}

impl<'a> Row<'a> {
    /// 1-based row number within the source.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self, col: usize) -> String {
        self.source.text(self.index, col)
    }
}

/// Rows `start..=row_count()`, after checking that row `start - 1` carries `anchor`
/// in column 1. Surrounding whitespace is ignored on both sides.
///
/// The anchor guards against a shifted layout being read with the wrong offsets.
pub fn data_rows<'a>(
    source: &'a dyn CellSource,
    table: &'static str,
    start: usize,
    anchor: &str,
) -> Result<Vec<Row<'a>>, BillingError> {
    let anchor_row = start.saturating_sub(1);
    let found = if anchor_row == 0 {
        String::new()
    } else {
        source.text(anchor_row, 1)
    };
    if found.trim() != anchor.trim() {
        return Err(BillingError::StructuralAnchorMismatch {
            table,
            row: anchor_row,
            expected: anchor.to_string(),
            found,
        });
    }

    Ok((start..=source.row_count())
        .map(|index| Row { source, index })
        .collect())
}

// ---------------------------------------------------------------------------
// In-memory grid
// ---------------------------------------------------------------------------

/// Dense in-memory table of text cells. Loaders fill one of these.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from row-major values; the first inner item is cell A1.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Set a cell, growing the grid as needed. Row and column are 1-based.
    pub fn set(&mut self, row: usize, col: usize, value: impl Into<String>) {
        if row == 0 || col == 0 {
            return;
        }
        if self.rows.len() < row {
            self.rows.resize_with(row, Vec::new);
        }
        let cells = &mut self.rows[row - 1];
        if cells.len() < col {
            cells.resize_with(col, String::new);
        }
        cells[col - 1] = value.into();
    }

    /// Drop trailing rows that hold no text at all.
    pub fn trim_trailing_blank_rows(&mut self) {
        while self
            .rows
            .last()
            .is_some_and(|r| r.iter().all(|c| c.trim().is_empty()))
        {
            self.rows.pop();
        }
    }
}

impl CellSource for Grid {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn text(&self, row: usize, col: usize) -> String {
        if row == 0 || col == 0 {
            return String::new();
        }
        self.rows
            .get(row - 1)
            .and_then(|r| r.get(col - 1))
            .cloned()
            .unwrap_or_default()
    }
}
