pub mod html;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::registry::Position;
use crate::scoring::{sort_descending, ScoreKey, ScoredRecord};

/// Display columns of the report, in order. Inputs must provide all of them.
pub const DISPLAY_COLUMNS: [&str; 11] = [
    "Name",
    "Position",
    "Nat",
    "Age",
    "Club",
    "Transfer Value",
    "Wage",
    "Personality",
    "Media Handling",
    "Left Foot",
    "Right Foot",
];

/// The report is always ranked by this column.
pub const REPORT_SORT_KEY: ScoreKey = ScoreKey::Position(Position::BPD);

pub const DEFAULT_TITLE: &str = "Player Analysis";

/// Sort rows for the report and render the document.
pub fn assemble(mut rows: Vec<ScoredRecord>, title: &str) -> String {
    sort_descending(&mut rows, REPORT_SORT_KEY);
    debug!("rendering {} rows sorted by {}", rows.len(), REPORT_SORT_KEY);
    html::render(&rows, &DISPLAY_COLUMNS, &Position::ALL, title)
}

/// Write the report atomically, creating parent directories as needed.
pub fn write_report(path: &Path, document: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open report file at {}", path.display()))?;
    file.write_all(document.as_bytes())
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save report to {}", path.display()))?;

    info!("report written to {}", path.display());
    Ok(())
}
