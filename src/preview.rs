//! Display-only preview of an uploaded CSV file.
//!
//! The file is parsed for its header and rows and handed back as a table. It is
//! never written to the graph store.

use serde::Serialize;
use thiserror::Error;

/// Rows returned in a preview; the total count is still reported
pub const MAX_PREVIEW_ROWS: usize = 1000;

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("File is empty")]
    Empty,

    #[error("Unable to read CSV: {0}")]
    Parse(#[from] csv::Error),
}

/// Parsed table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvPreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Total data rows in the file
    pub row_count: usize,
}

/// Parse a CSV document with a header row.
pub fn preview_csv(data: &[u8]) -> Result<CsvPreview, PreviewError> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Err(PreviewError::Empty);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    let mut row_count = 0;
    for record in reader.records() {
        let record = record?;
        if rows.len() < MAX_PREVIEW_ROWS {
            rows.push(record.iter().map(str::to_string).collect());
        }
        row_count += 1;
    }

    Ok(CsvPreview {
        headers,
        rows,
        row_count,
    })
}
