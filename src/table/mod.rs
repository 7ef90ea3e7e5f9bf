pub mod html;

use std::fs;
use std::path::{Path, PathBuf};

use scraper::Html;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed input: no <table> element found")]
    NoTable,

    #[error("malformed input: the first <table> has no header row")]
    NoHeader,

    #[error("malformed input: missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// The first table of an export: header names plus cell text per row.
///
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Fail with every required column the header lacks.
    pub fn require_columns(&self, required: &[&str]) -> Result<(), InputError> {
        let missing: Vec<String> = required
            .iter()
            .filter(|name| self.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(InputError::MissingColumns(missing))
        }
    }
}

/// Parse the first `<table>` of an HTML document.
///
/// The first row is the header, whether it uses `<th>` or `<td>` cells.
/// Short rows are padded with blank cells; surplus cells are dropped.
pub fn parse_table(document: &str) -> Result<RawTable, InputError> {
    let document = Html::parse_document(document);
    let table = html::first_table(&document).ok_or(InputError::NoTable)?;

    let mut rows = html::rows(table)
        .into_iter()
        .filter(|cells| !cells.is_empty());

    let columns = rows.next().ok_or(InputError::NoHeader)?;
    let width = columns.len();

    let rows: Vec<Vec<String>> = rows
        .enumerate()
        .map(|(i, mut cells)| {
            if cells.len() > width {
                warn!(
                    "row {} has {} cells but the header has {}; dropping the extras",
                    i + 1,
                    cells.len(),
                    width
                );
            }
            cells.resize(width, String::new());
            cells
        })
        .collect();

    debug!("parsed table with {} columns and {} rows", width, rows.len());
    Ok(RawTable::new(columns, rows))
}

/// Read and parse an export file.
pub fn load_table(path: &Path) -> Result<RawTable, InputError> {
    let bytes = fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Exports are UTF-8; tolerate stray bytes rather than refusing the file.
    let document = String::from_utf8_lossy(&bytes);
    parse_table(&document)
}
