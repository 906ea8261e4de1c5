//! Format-aware content comparison
//!
//! Decides whether freshly downloaded remote content differs from the
//! local copy, which drives the overwrite-or-skip decision. Comparison
//! is by parsed content, not raw bytes: a re-exported spreadsheet whose
//! cells are identical does not count as a change even when the binary
//! container differs.
//!
//! Supported formats are picked by file extension:
//! - `xlsx` - all worksheets compared cell-by-cell (values and types)
//! - `csv`  - record-by-record, no header interpretation
//! - `txt`  - exact UTF-8 text comparison
//!
//! Anything else, and any read or parse failure, degrades to "differs":
//! an undecidable comparison forces the overwrite rather than risking a
//! stale local copy.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use sitesync_core::domain::errors::CompareError;
use tracing::{debug, warn};

/// A worksheet as a named grid of cells
type Worksheet = (String, Vec<Vec<Data>>);

/// Compares downloaded content against a local file
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentComparator;

impl ContentComparator {
    /// Creates a comparator
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns true when the remote content should replace the local file
    ///
    /// A missing local file always differs. Comparison failures are
    /// logged and degrade to "differs".
    pub fn differs(&self, remote: &[u8], local: &Path) -> bool {
        if !local.exists() {
            return true;
        }

        match self.compare(remote, local) {
            Ok(differs) => differs,
            Err(e) => {
                warn!(path = %local.display(), error = %e, "Comparison failed; treating as changed");
                true
            }
        }
    }

    fn compare(&self, remote: &[u8], local: &Path) -> Result<bool, CompareError> {
        let extension = local
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("xlsx") => compare_xlsx(remote, local),
            Some("csv") => compare_csv(remote, local),
            Some("txt") => compare_txt(remote, local),
            other => {
                // No content-level comparison for this format; always
                // take the remote copy.
                debug!(path = %local.display(), extension = ?other, "Unsupported format; treating as changed");
                Ok(true)
            }
        }
    }
}

// ============================================================================
// xlsx
// ============================================================================

fn compare_xlsx(remote: &[u8], local: &Path) -> Result<bool, CompareError> {
    let mut remote_wb =
        Xlsx::new(Cursor::new(remote)).map_err(|e| CompareError::Parse {
            format: "xlsx",
            reason: e.to_string(),
        })?;
    let mut local_wb: Xlsx<_> = open_workbook(local).map_err(|e: XlsxError| CompareError::Parse {
        format: "xlsx",
        reason: e.to_string(),
    })?;

    let remote_sheets = extract_worksheets(&mut remote_wb)?;
    let local_sheets = extract_worksheets(&mut local_wb)?;

    Ok(worksheets_differ(&remote_sheets, &local_sheets))
}

/// Reads every worksheet into a named cell grid
fn extract_worksheets<RS>(workbook: &mut Xlsx<RS>) -> Result<Vec<Worksheet>, CompareError>
where
    RS: std::io::Read + std::io::Seek,
{
    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| CompareError::Parse {
                format: "xlsx",
                reason: format!("worksheet '{name}': {e}"),
            })?;
        let cells: Vec<Vec<Data>> = range.rows().map(<[Data]>::to_vec).collect();
        sheets.push((name, cells));
    }
    Ok(sheets)
}

/// True when the workbooks differ in sheet names, order, shape, or any cell
///
/// `Data` equality covers both value and type, so `2` (number) and `"2"`
/// (string) differ.
fn worksheets_differ(a: &[Worksheet], b: &[Worksheet]) -> bool {
    a != b
}

// ============================================================================
// csv
// ============================================================================

fn compare_csv(remote: &[u8], local: &Path) -> Result<bool, CompareError> {
    let remote_records = read_csv_records(csv_reader_from(Cursor::new(remote)))?;
    let local_records = read_csv_records(
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(local)
            .map_err(|e| CompareError::Parse {
                format: "csv",
                reason: e.to_string(),
            })?,
    )?;

    Ok(remote_records != local_records)
}

fn csv_reader_from<R: std::io::Read>(reader: R) -> csv::Reader<R> {
    // No header interpretation: the first row is data like any other,
    // and ragged rows are allowed.
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

fn read_csv_records<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> Result<Vec<csv::StringRecord>, CompareError> {
    reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CompareError::Parse {
            format: "csv",
            reason: e.to_string(),
        })
}

// ============================================================================
// txt
// ============================================================================

fn compare_txt(remote: &[u8], local: &Path) -> Result<bool, CompareError> {
    let remote_text = std::str::from_utf8(remote).map_err(|e| CompareError::Parse {
        format: "utf-8 text",
        reason: e.to_string(),
    })?;
    let local_text = std::fs::read_to_string(local).map_err(|e| CompareError::LocalRead {
        path: local.to_path_buf(),
        source: e,
    })?;

    Ok(remote_text != local_text)
}
