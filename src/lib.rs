//! Score scouted football players for every on-field position and render a
//! sortable HTML report.
//!
//! The pipeline is `table` (read the export) -> `normalize` (current values)
//! -> `scoring` (position and general scores) -> `report` (HTML document).

pub mod browser;
pub mod config;
pub mod logging;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod scoring;
pub mod table;
