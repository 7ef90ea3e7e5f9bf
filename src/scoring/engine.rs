use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::normalize::NormalizedRecord;
use crate::registry::{AttributeRegistry, Position, WeightTable, MAX_ATTRIBUTE_VALUE};

/// Which weight tables feed `Current_Score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneralWeighting {
    /// Sum of the raw weighted sums of every position's table. Attributes
    /// used by several positions are counted once per table.
    #[default]
    AllPositions,
    /// Raw weighted sum of a single position's table.
    Single(Position),
}

impl fmt::Display for GeneralWeighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneralWeighting::AllPositions => f.write_str("all positions"),
            GeneralWeighting::Single(p) => write!(f, "{} only", p),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AttributeContribution {
    pub code: String,
    pub current: Option<f64>,
    pub weight: f64,
    /// `current * weight`, 0 for missing or unregistered attributes.
    pub contribution: f64,
    /// False when the code isn't in the attribute catalog.
    pub registered: bool,
}

#[derive(Debug, Clone)]
pub struct PositionScore {
    pub position: Position,
    pub raw: f64,
    pub max_possible: f64,
    pub score: f64,
    pub breakdown: Vec<AttributeContribution>,
}

/// `Σ current * weight` over the table's registered attributes; missing
/// values count as 0.
pub fn raw_score(record: &NormalizedRecord, table: &WeightTable, registry: &AttributeRegistry) -> f64 {
    table
        .iter()
        .filter(|(code, _)| registry.is_attribute(code))
        .map(|(code, weight)| record.current_value(code) * weight)
        .sum()
}

/// Rescale a raw score to 0-20 against the registry's shared denominator.
pub fn normalize_score(raw: f64, max_possible: f64) -> f64 {
    raw / max_possible * MAX_ATTRIBUTE_VALUE
}

/// 0-20 fitness of `record` for a position scored with `table`.
///
/// The denominator always comes from the registry's reference position, not
/// from `table`.
pub fn score_position(record: &NormalizedRecord, table: &WeightTable, registry: &AttributeRegistry) -> f64 {
    normalize_score(raw_score(record, table, registry), registry.max_possible())
}

/// Unscaled aggregate score.
pub fn general_score(
    record: &NormalizedRecord,
    weighting: GeneralWeighting,
    registry: &AttributeRegistry,
) -> f64 {
    match weighting {
        GeneralWeighting::AllPositions => registry
            .tables()
            .map(|(_, table)| raw_score(record, table, registry))
            .sum(),
        GeneralWeighting::Single(position) => raw_score(record, registry.table(position), registry),
    }
}

/// Score with a per-attribute breakdown.
pub fn explain_position(
    record: &NormalizedRecord,
    position: Position,
    registry: &AttributeRegistry,
) -> PositionScore {
    let breakdown: Vec<AttributeContribution> = registry
        .table(position)
        .iter()
        .map(|(code, weight)| {
            let registered = registry.is_attribute(code);
            let current = record.current(code);
            let contribution = if registered {
                record.current_value(code) * weight
            } else {
                0.0
            };
            AttributeContribution {
                code: code.to_string(),
                current,
                weight,
                contribution,
                registered,
            }
        })
        .collect();

    let raw = breakdown.iter().map(|c| c.contribution).sum();
    let max_possible = registry.max_possible();
    PositionScore {
        position,
        raw,
        max_possible,
        score: normalize_score(raw, max_possible),
        breakdown,
    }
}

/// A normalized record with its position scores and `Current_Score`.
#[derive(Debug, Clone)]
pub struct ScoredRecord {
    pub record: NormalizedRecord,
    pub scores: BTreeMap<Position, f64>,
    pub current_score: f64,
}

impl ScoredRecord {
    pub fn score(&self, position: Position) -> f64 {
        self.scores.get(&position).copied().unwrap_or(f64::NAN)
    }

    pub fn value(&self, key: ScoreKey) -> f64 {
        match key {
            ScoreKey::Position(p) => self.score(p),
            ScoreKey::Current => self.current_score,
        }
    }
}

/// A score column to rank by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKey {
    Position(Position),
    Current,
}

impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreKey::Position(p) => f.write_str(&p.score_column()),
            ScoreKey::Current => f.write_str("Current_Score"),
        }
    }
}

impl FromStr for ScoreKey {
    type Err = anyhow::Error;

    /// `current` or a position code, optionally with the `_Score` suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_suffix("_Score")
            .or_else(|| s.strip_suffix("_score"))
            .unwrap_or(s);
        if s.eq_ignore_ascii_case("current") {
            Ok(ScoreKey::Current)
        } else {
            Ok(ScoreKey::Position(s.parse()?))
        }
    }
}

pub fn score_record(
    record: NormalizedRecord,
    registry: &AttributeRegistry,
    weighting: GeneralWeighting,
) -> ScoredRecord {
    let scores = registry
        .tables()
        .map(|(position, table)| (position, score_position(&record, table, registry)))
        .collect();
    let current_score = general_score(&record, weighting, registry);
    ScoredRecord {
        record,
        scores,
        current_score,
    }
}

/// Score every row; output order matches input order.
pub fn score_records(
    rows: Vec<NormalizedRecord>,
    registry: &AttributeRegistry,
    weighting: GeneralWeighting,
) -> Vec<ScoredRecord> {
    #[cfg(feature = "parallel")]
    let scored = rows
        .into_par_iter()
        .map(|record| score_record(record, registry, weighting))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let scored = rows
        .into_iter()
        .map(|record| score_record(record, registry, weighting))
        .collect();

    scored
}

/// Stable sort, highest first. NaN compares equal so it never reorders ties.
pub fn sort_descending(rows: &mut [ScoredRecord], key: ScoreKey) {
    rows.sort_by(|a, b| {
        b.value(key)
            .partial_cmp(&a.value(key))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
