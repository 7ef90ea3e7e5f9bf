pub mod defaults;
pub mod position;

pub use position::Position;

use std::collections::{BTreeMap, HashSet};

/// Highest value a scouting attribute can take.
pub const MAX_ATTRIBUTE_VALUE: f64 = 20.0;

/// Position whose table provides the normalization denominator by default.
pub const DEFAULT_REFERENCE: Position = Position::CF;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RegistryError {
    #[error("no weight table configured for position {0}")]
    MissingTable(Position),

    #[error("reference position {position} has a maximum possible score of {max}; it must be positive")]
    ZeroDenominator { position: Position, max: f64 },

    #[error("attribute catalog is empty")]
    NoAttributes,
}

/// Attribute code -> weight for one position, in authored order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightTable {
    entries: Vec<(String, f64)>,
}

impl WeightTable {
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self::new(pairs.iter().map(|(c, w)| (c.to_string(), *w)).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(c, w)| (c.as_str(), *w))
    }

    pub fn weight(&self, code: &str) -> Option<f64> {
        self.entries.iter().find(|(c, _)| c == code).map(|(_, w)| *w)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of `weight * 20` over every entry, registered or not.
    pub fn max_possible(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, w)| w * MAX_ATTRIBUTE_VALUE)
            .sum()
    }
}

/// A weight-table code that isn't in the attribute catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftReference {
    pub position: Position,
    pub code: String,
    /// Catalog code that matches ignoring ASCII case, if any.
    pub suggestion: Option<String>,
}

/// The attribute catalog plus one weight table per position.
///
/// Built once at startup and passed by reference to the normalizer and
/// scorers; nothing reads it through a global.
#[derive(Debug, Clone)]
pub struct AttributeRegistry {
    attributes: Vec<String>,
    lookup: HashSet<String>,
    tables: BTreeMap<Position, WeightTable>,
    reference: Position,
    max_possible: f64,
}

impl AttributeRegistry {
    /// Build a registry, checking that every position has a table and that the
    /// reference table yields a usable denominator.
    pub fn new(
        attributes: Vec<String>,
        tables: BTreeMap<Position, WeightTable>,
        reference: Position,
    ) -> Result<Self, RegistryError> {
        if attributes.is_empty() {
            return Err(RegistryError::NoAttributes);
        }
        if let Some(missing) = Position::ALL.iter().find(|p| !tables.contains_key(p)) {
            return Err(RegistryError::MissingTable(*missing));
        }

        let max_possible = tables[&reference].max_possible();
        if !(max_possible.is_finite() && max_possible > 0.0) {
            return Err(RegistryError::ZeroDenominator {
                position: reference,
                max: max_possible,
            });
        }

        let lookup = attributes.iter().cloned().collect();
        Ok(Self {
            attributes,
            lookup,
            tables,
            reference,
            max_possible,
        })
    }

    /// The built-in catalog and tables, normalized against CF.
    pub fn builtin() -> Self {
        let attributes = defaults::ATTRIBUTE_CODES
            .iter()
            .map(|c| c.to_string())
            .collect();
        let tables = Position::ALL
            .iter()
            .map(|p| (*p, WeightTable::from_pairs(defaults::weights_for(*p))))
            .collect();
        Self::new(attributes, tables, DEFAULT_REFERENCE)
            .expect("built-in registry is well formed")
    }

    /// Replace one position's table, re-checking the denominator.
    pub fn with_table(self, position: Position, table: WeightTable) -> Result<Self, RegistryError> {
        let mut tables = self.tables;
        tables.insert(position, table);
        Self::new(self.attributes, tables, self.reference)
    }

    /// Use another position's table as the normalization reference.
    pub fn with_reference(self, reference: Position) -> Result<Self, RegistryError> {
        Self::new(self.attributes, self.tables, reference)
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn is_attribute(&self, code: &str) -> bool {
        self.lookup.contains(code)
    }

    pub fn table(&self, position: Position) -> &WeightTable {
        // Presence of every position is checked in `new`.
        &self.tables[&position]
    }

    pub fn tables(&self) -> impl Iterator<Item = (Position, &WeightTable)> + '_ {
        self.tables.iter().map(|(p, t)| (*p, t))
    }

    pub fn reference(&self) -> Position {
        self.reference
    }

    /// Shared denominator for every position score.
    pub fn max_possible(&self) -> f64 {
        self.max_possible
    }

    /// Codes referenced by a weight table but absent from the catalog.
    pub fn soft_references(&self) -> Vec<SoftReference> {
        self.tables()
            .flat_map(|(position, table)| {
                table
                    .iter()
                    .filter(|(code, _)| !self.is_attribute(code))
                    .map(move |(code, _)| SoftReference {
                        position,
                        code: code.to_string(),
                        suggestion: self
                            .attributes
                            .iter()
                            .find(|a| a.eq_ignore_ascii_case(code))
                            .cloned(),
                    })
            })
            .collect()
    }
}
