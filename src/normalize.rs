//! Turn raw export rows into records with one numeric current value per
//! attribute column.
//!
//! Attribute cells arrive as a plain number (`"14"`), a current-potential
//! range (`"12-16"`), or nothing at all. Anything that can't be read as a
//! number becomes *missing*, never an error and never zero.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, warn};

use crate::registry::AttributeRegistry;
use crate::table::RawTable;

/// Display text substituted for blank non-attribute cells.
pub const NOT_AVAILABLE: &str = "Not Available";

/// Cell contents an export tool writes for "no value".
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Current value of an attribute cell.
///
/// 1. `"C-P"` with a non-blank `C`: parse `C` (whatever `P` is).
/// 2. otherwise non-blank text: parse the whole trimmed text.
/// 3. otherwise, or if parsing fails or yields a non-finite number: `None`.
pub fn parse_current(cell: &str) -> Option<f64> {
    if let Some((current, _potential)) = cell.split_once('-') {
        let current = current.trim();
        if !current.is_empty() {
            return parse_finite(current);
        }
    }
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_finite(trimmed)
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whether a display cell counts as blank.
pub fn is_missing_display(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || NA_TOKENS.contains(&trimmed)
}

/// Name of the derived current-value field for an attribute column.
pub fn current_column(code: &str) -> String {
    format!("{}_Current", code)
}

/// One player row after normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedRecord {
    /// Column name -> cell text, in input order. Attribute cells keep their
    /// raw text; blank display cells hold [`NOT_AVAILABLE`].
    values: Vec<(String, String)>,
    /// Attribute code -> current value for every attribute column present.
    current: BTreeMap<String, Option<f64>>,
}

impl NormalizedRecord {
    /// Build a record directly from current values, with no display fields.
    #[cfg(test)]
    pub(crate) fn from_current<'a>(values: impl IntoIterator<Item = (&'a str, Option<f64>)>) -> Self {
        Self {
            values: Vec::new(),
            current: values
                .into_iter()
                .map(|(code, v)| (code.to_string(), v))
                .collect(),
        }
    }

    /// Add or replace a display field.
    #[cfg(test)]
    pub(crate) fn with_field(mut self, column: &str, value: &str) -> Self {
        let value = if is_missing_display(value) {
            NOT_AVAILABLE.to_string()
        } else {
            value.to_string()
        };
        match self.values.iter_mut().find(|(c, _)| c == column) {
            Some(slot) => slot.1 = value,
            None => self.values.push((column.to_string(), value)),
        }
        self
    }

    /// Cell text for a column (raw text for attribute columns).
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Display text for a column, [`NOT_AVAILABLE`] if the column is absent.
    pub fn display(&self, column: &str) -> &str {
        self.get(column).unwrap_or(NOT_AVAILABLE)
    }

    pub fn name(&self) -> &str {
        self.display("Name")
    }

    pub fn has_attribute(&self, code: &str) -> bool {
        self.current.contains_key(code)
    }

    /// Current value, `None` when missing or when the column wasn't exported.
    pub fn current(&self, code: &str) -> Option<f64> {
        self.current.get(code).copied().flatten()
    }

    /// Current value for weighted sums: a missing attribute contributes 0.
    ///
    /// This is the only place the missing-value policy is applied.
    pub fn current_value(&self, code: &str) -> f64 {
        self.current(code).unwrap_or(0.0)
    }

    /// Every `(code, current)` pair, in code order.
    pub fn current_values(&self) -> impl Iterator<Item = (&str, Option<f64>)> + '_ {
        self.current.iter().map(|(c, v)| (c.as_str(), *v))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.values.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }
}

/// Normalized rows plus the header they came from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedTable {
    pub columns: Vec<String>,
    /// Columns recognized as attributes, in input order.
    pub attribute_columns: Vec<String>,
    pub rows: Vec<NormalizedRecord>,
}

/// Normalize every row of `table`. Row and column order are preserved and no
/// row is dropped.
pub fn normalize(table: &RawTable, registry: &AttributeRegistry) -> NormalizedTable {
    // A repeated attribute header only counts the first time; later copies
    // are kept as plain columns.
    let mut seen = HashSet::new();
    let is_attribute: Vec<bool> = table
        .columns
        .iter()
        .map(|c| {
            if !registry.is_attribute(c) {
                false
            } else if seen.insert(c.as_str()) {
                true
            } else {
                warn!("duplicate attribute column '{}'; only the first is scored", c);
                false
            }
        })
        .collect();

    let rows: Vec<NormalizedRecord> = table
        .rows
        .iter()
        .map(|cells| {
            let mut record = NormalizedRecord::default();
            for ((column, cell), attribute) in table.columns.iter().zip(cells).zip(&is_attribute) {
                if *attribute {
                    record.current.insert(column.clone(), parse_current(cell));
                    record.values.push((column.clone(), cell.clone()));
                } else if is_missing_display(cell) {
                    record.values.push((column.clone(), NOT_AVAILABLE.to_string()));
                } else {
                    record.values.push((column.clone(), cell.clone()));
                }
            }
            record
        })
        .collect();

    let attribute_columns: Vec<String> = table
        .columns
        .iter()
        .zip(&is_attribute)
        .filter(|(_, a)| **a)
        .map(|(c, _)| c.clone())
        .collect();

    debug!(
        "normalized {} rows ({} attribute columns, {} display columns)",
        rows.len(),
        attribute_columns.len(),
        table.columns.len() - attribute_columns.len()
    );

    NormalizedTable {
        columns: table.columns.clone(),
        attribute_columns,
        rows,
    }
}
