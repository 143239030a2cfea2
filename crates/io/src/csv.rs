// CSV/TSV import into a text grid

use std::io::Read;
use std::path::Path;

use powerbill_recon::Grid;

use crate::error::IoError;

pub fn import(path: &Path) -> Result<Grid, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(path, &content, delimiter)
}

pub fn import_tsv(path: &Path) -> Result<Grid, IoError> {
    let content = read_file_as_utf8(path)?;
    import_from_string(path, &content, b'\t')
}

const SNIFF_LINES: usize = 10;

/// Pick the delimiter that splits the first lines into the widest consistent table.
///
/// Swedish exports are semicolon-separated since the comma is the decimal mark,
/// so on a tie the semicolon wins (`12;3360,40` reads as two fields, not three).
fn sniff_delimiter(content: &str) -> u8 {
    let sample = content.lines().take(SNIFF_LINES).collect::<Vec<_>>().join("\n");
    // Ascending preference; `max_by_key` keeps the last of equal scores.
    [b'|', b',', b'\t', b';']
        .into_iter()
        .map(|delim| (delim, table_width_score(&sample, delim)))
        .filter(|&(_, score)| score > 0)
        .max_by_key(|&(_, score)| score)
        .map_or(b';', |(delim, _)| delim)
}

/// Rows as wide as the first row, times that width. Zero if the first row
/// does not split at all.
fn table_width_score(sample: &str, delimiter: u8) -> usize {
    let widths: Vec<usize> = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(sample.as_bytes())
        .records()
        .filter_map(Result::ok)
        .map(|record| record.len())
        .collect();
    match widths.first() {
        Some(&first) if first > 1 => widths.iter().filter(|&&w| w == first).count() * first,
        _ => 0,
    }
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let open_err = |e: std::io::Error| IoError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut file = std::fs::File::open(path).map_err(open_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(open_err)?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s.trim_start_matches('\u{feff}').to_string()),
        Err(e) => {
            // Excel on Windows saves "CSV (semicolon)" as Windows-1252
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            log::debug!("{}: not UTF-8, decoded as Windows-1252", path.display());
            Ok(decoded.into_owned())
        }
    }
}

fn import_from_string(path: &Path, content: &str, delimiter: u8) -> Result<Grid, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid = Grid::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| IoError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        // A row of empty fields still counts, so row numbers match the spreadsheet
        grid.set(row_idx + 1, 1, "");
        for (col_idx, field) in record.iter().enumerate() {
            if !field.is_empty() {
                grid.set(row_idx + 1, col_idx + 1, field);
            }
        }
    }

    grid.trim_trailing_blank_rows();
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerbill_recon::CellSource;

    fn write(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn semicolon_export_with_decimal_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "ledger.csv",
            "Elavräkning;;;;;Elkostnad 2023: 2,34 kr/kWh;;\n\
             Lägenhet;;;;Förbrukning;;Betalt;Avräkning\n\
             12;;;;1500;;3360,40;150\n"
                .as_bytes(),
        );
        let grid = import(&path).unwrap();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.text(1, 6), "Elkostnad 2023: 2,34 kr/kWh");
        assert_eq!(grid.text(2, 1), "Lägenhet");
        assert_eq!(grid.text(3, 7), "3360,40");
    }

    #[test]
    fn windows_1252_is_decoded() {
        let dir = tempfile::tempdir().unwrap();
        // "Lägenhet;x" with ä as 0xE4
        let path = write(&dir, "ledger.csv", b"L\xe4genhet;x\n");
        let grid = import(&path).unwrap();
        assert_eq!(grid.text(1, 1), "Lägenhet");
    }

    #[test]
    fn bom_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "roster.csv", "\u{feff}Namn;Kod\n".as_bytes());
        assert_eq!(import(&path).unwrap().text(1, 1), "Namn");
    }

    #[test]
    fn empty_field_rows_keep_row_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "roster.csv", "a;b\n;\nc;d\n;\n".as_bytes());
        let grid = import(&path).unwrap();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.text(3, 1), "c");
    }

    #[test]
    fn quoted_comma_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "roster.csv", "Namn,Kod\n\"Berg, Anna\",1-2-3-12-1\n".as_bytes());
        let grid = import(&path).unwrap();
        assert_eq!(grid.text(2, 1), "Berg, Anna");
        assert_eq!(grid.text(2, 2), "1-2-3-12-1");
    }

    #[test]
    fn semicolon_beats_decimal_comma_on_a_tie() {
        assert_eq!(sniff_delimiter("12;3360,40\n13;1950,5\n"), b';');
        assert_eq!(sniff_delimiter("Namn\tKod\nBerg, Anna\t1-2-3-12-1\n"), b'\t');
        assert_eq!(sniff_delimiter("Namn,Kod,E-post\nBerg,1-2-3-12-1,a@x.se\n"), b',');
        assert_eq!(sniff_delimiter("single column\n"), b';');
    }

    #[test]
    fn missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = import(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, IoError::Open { .. }));
    }
}
