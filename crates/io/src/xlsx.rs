// Excel/ODS import (xlsx, xlsm, xls, xlsb, ods) into a text grid

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use powerbill_recon::Grid;

use crate::error::IoError;

/// Cap on rows read from one sheet. Rosters and ledgers are a few hundred rows.
const MAX_ROWS: usize = 100_000;
const MAX_COLS: usize = 256;

/// Import one worksheet as text. `sheet` defaults to the first sheet.
pub fn import(path: &Path, sheet: Option<&str>) -> Result<Grid, IoError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IoError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|s| s.as_str() == name)
            .cloned()
            .ok_or_else(|| IoError::UnknownSheet {
                path: path.to_path_buf(),
                sheet: name.to_string(),
                available: sheet_names.clone(),
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| IoError::NoSheets(path.to_path_buf()))?,
    };

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| IoError::Read {
        path: path.to_path_buf(),
        message: format!("sheet '{sheet_name}': {e}"),
    })?;

    let mut grid = Grid::new();
    let (height, width) = range.get_size();
    if height == 0 || width == 0 {
        return Ok(grid);
    }
    if height > MAX_ROWS || width > MAX_COLS {
        log::warn!(
            "sheet '{sheet_name}' truncated from {height}x{width} to at most {MAX_ROWS}x{MAX_COLS}"
        );
    }

    // Range start offset (data may not begin at A1)
    let (data_start_row, data_start_col) = range.start().unwrap_or((0, 0));

    for (row_idx, row) in range.rows().enumerate() {
        let target_row = data_start_row as usize + row_idx;
        if target_row >= MAX_ROWS {
            break;
        }
        for (col_idx, cell) in row.iter().enumerate() {
            let target_col = data_start_col as usize + col_idx;
            if target_col >= MAX_COLS {
                break;
            }
            if let Some(text) = cell_text(cell) {
                grid.set(target_row + 1, target_col + 1, text);
            }
        }
    }

    grid.trim_trailing_blank_rows();
    log::debug!(
        "{}: sheet '{sheet_name}', {} rows",
        path.display(),
        powerbill_recon::CellSource::row_count(&grid)
    );
    Ok(grid)
}

/// Render a cell the way the spreadsheet shows it unformatted. `None` for empty cells.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => (!s.is_empty()).then(|| s.clone()),
        Data::Float(n) => {
            // Integers without decimals
            if n.fract() == 0.0 && n.abs() < 1e15 {
                Some(format!("{}", *n as i64))
            } else {
                Some(format!("{}", n))
            }
        }
        Data::Int(n) => Some(format!("{}", n)),
        Data::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => Some(format!("#{:?}", e)),
        // Date serial; no ledger column holds dates
        Data::DateTime(dt) => Some(format!("{}", dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerbill_recon::CellSource;
    use rust_xlsxwriter::Workbook;

    fn ledger_workbook(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("ledger.xlsx");
        let mut workbook = Workbook::new();

        let cover = workbook.add_worksheet();
        cover.set_name("Info").unwrap();
        cover.write_string(0, 0, "Se nästa flik").unwrap();

        let sheet = workbook.add_worksheet();
        sheet.set_name("El 2023").unwrap();
        sheet.write_string(0, 0, "Elavräkning").unwrap();
        sheet.write_string(0, 5, "Elkostnad 2023: 2,34 kr/kWh").unwrap();
        sheet.write_string(1, 0, "Lägenhet").unwrap();
        sheet.write_number(2, 0, 12.0).unwrap();
        sheet.write_number(2, 4, 1500.0).unwrap();
        sheet.write_number(2, 6, 3360.4).unwrap();
        sheet.write_number(2, 7, -75.0).unwrap();

        workbook.save(&path).unwrap();
        path
    }

    #[test]
    fn named_sheet_is_read_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = ledger_workbook(&dir);
        let grid = import(&path, Some("El 2023")).unwrap();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.text(1, 6), "Elkostnad 2023: 2,34 kr/kWh");
        assert_eq!(grid.text(2, 1), "Lägenhet");
        assert_eq!(grid.text(3, 1), "12");
        assert_eq!(grid.text(3, 5), "1500");
        assert_eq!(grid.text(3, 7), "3360.4");
        assert_eq!(grid.text(3, 8), "-75");
        assert_eq!(grid.text(3, 2), "");
    }

    #[test]
    fn first_sheet_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = ledger_workbook(&dir);
        let grid = import(&path, None).unwrap();
        assert_eq!(grid.text(1, 1), "Se nästa flik");
    }

    #[test]
    fn unknown_sheet_lists_available() {
        let dir = tempfile::tempdir().unwrap();
        let path = ledger_workbook(&dir);
        match import(&path, Some("El 2024")) {
            Err(IoError::UnknownSheet { available, .. }) => {
                assert_eq!(available, vec!["Info".to_string(), "El 2023".to_string()]);
            }
            other => panic!("expected UnknownSheet, got {other:?}"),
        }
    }

    #[test]
    fn float_cells_render_without_trailing_zero() {
        assert_eq!(cell_text(&Data::Float(412.0)), Some("412".into()));
        assert_eq!(cell_text(&Data::Float(2.5)), Some("2.5".into()));
        assert_eq!(cell_text(&Data::String(String::new())), None);
        assert_eq!(cell_text(&Data::Empty), None);
    }
}
