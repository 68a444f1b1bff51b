//! CSV loading for the Launch Calendar.
//!
//! Reads the launch grid file into a [`LaunchTable`]: the first column is
//! the brand label whatever its header says, every remaining header that
//! parses as `"<year>-<mon3>"` becomes a period column, and anything else
//! is logged and skipped as a non-data column. Cells are parsed into
//! [`CellValue`](calendar_core::models::CellValue) exactly once, here.

use std::fs::File;
use std::path::Path;

use calendar_core::error::{CalendarError, Result};
use calendar_core::models::{BrandRow, CellValue, LaunchTable, Period};
use tracing::{debug, warn};

/// Load and parse the launch grid at `path`.
///
/// Fatal errors: the file cannot be opened, a record cannot be parsed, or
/// the file has no header row. A file whose header yields *no* period
/// columns is not an error; it loads as a table with empty periods and the
/// UI degrades to its informational state.
pub fn load_table(path: &Path) -> Result<LaunchTable> {
    let file = File::open(path).map_err(|source| CalendarError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(CalendarError::MissingHeader(path.to_path_buf()));
    }

    // Classify every header after the brand column. Column indices are kept
    // so that cells can be picked out of each record in header order.
    let mut periods: Vec<Period> = Vec::new();
    let mut period_cols: Vec<usize> = Vec::new();
    for (idx, header) in headers.iter().enumerate().skip(1) {
        match Period::parse_label(header) {
            Some(period) => {
                periods.push(period);
                period_cols.push(idx);
            }
            None => {
                debug!(column = header, "ignoring non-period column");
            }
        }
    }

    if periods.is_empty() {
        warn!(
            path = %path.display(),
            "no period columns found; selector domains will be empty"
        );
    }

    let mut rows: Vec<BrandRow> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let brand = record.get(0).unwrap_or("").trim().to_string();
        // Short records yield empty cells for the missing columns.
        let cells: Vec<CellValue> = period_cols
            .iter()
            .map(|&col| CellValue::parse(record.get(col).unwrap_or("")))
            .collect();
        rows.push(BrandRow { brand, cells });
    }

    debug!(
        rows = rows.len(),
        periods = periods.len(),
        path = %path.display(),
        "launch grid loaded"
    );

    Ok(LaunchTable { periods, rows })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use calendar_core::models::Month;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(content.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn test_load_basic_grid() {
        let file = write_csv(
            "brand,2024-Jan,2024-Feb\n\
             Nike,\"AirMax, Zoom\",\n\
             Adidas,None,Samba\n",
        );
        let table = load_table(file.path()).expect("load");

        assert_eq!(table.periods.len(), 2);
        assert_eq!(table.periods[0].year, "2024");
        assert_eq!(table.periods[0].month, Month::Jan);

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].brand, "Nike");
        assert_eq!(table.rows[0].cells[0].count(), 2);
        assert_eq!(table.rows[0].cells[1].count(), 0);
        assert_eq!(table.rows[1].cells[0], CellValue::Missing);
        assert_eq!(table.rows[1].cells[0].count(), 0);
        assert_eq!(table.rows[1].cells[1].shoes(), ["Samba"]);
    }

    #[test]
    fn test_first_column_header_text_is_irrelevant() {
        let file = write_csv("Vendor Name,2024-Jan\nNike,AirMax\n");
        let table = load_table(file.path()).expect("load");
        assert_eq!(table.rows[0].brand, "Nike");
        assert_eq!(table.periods.len(), 1);
    }

    #[test]
    fn test_non_period_columns_excluded_silently() {
        let file = write_csv("brand,Notes,2024-Jan,2024-Foo\nNike,ignore me,AirMax,also ignored\n");
        let table = load_table(file.path()).expect("load");

        assert_eq!(table.periods.len(), 1);
        assert_eq!(table.periods[0].label(), "2024-Jan");
        // The surviving cell is the one under 2024-Jan, not the Notes cell.
        assert_eq!(table.rows[0].cells.len(), 1);
        assert_eq!(table.rows[0].cells[0].shoes(), ["AirMax"]);
    }

    #[test]
    fn test_no_period_columns_is_not_fatal() {
        let file = write_csv("brand,Notes\nNike,whatever\n");
        let table = load_table(file.path()).expect("load");
        assert!(table.periods.is_empty());
        assert_eq!(table.rows.len(), 1);
        assert!(table.rows[0].cells.is_empty());
    }

    #[test]
    fn test_short_records_pad_with_empty_cells() {
        let file = write_csv("brand,2024-Jan,2024-Feb\nNike,AirMax\n");
        let table = load_table(file.path()).expect("load");
        assert_eq!(table.rows[0].cells.len(), 2);
        assert_eq!(table.rows[0].cells[1], CellValue::Empty);
    }

    #[test]
    fn test_duplicate_brand_rows_are_kept() {
        let file = write_csv("brand,2024-Jan\nNike,AirMax\nNike,Zoom\n");
        let table = load_table(file.path()).expect("load");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].brand, "Nike");
        assert_eq!(table.rows[1].brand, "Nike");
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = load_table(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, CalendarError::FileRead { .. }));
    }

    #[test]
    fn test_empty_file_has_no_header() {
        let file = write_csv("");
        let err = load_table(file.path()).unwrap_err();
        assert!(matches!(err, CalendarError::MissingHeader(_)));
    }
}
