use std::path::Path;

use tracing::{debug, info, warn};

use crate::normalize::normalize;
use crate::registry::{AttributeRegistry, Position};
use crate::report::DISPLAY_COLUMNS;
use crate::scoring::{
    check_soft_references, describe_soft_reference, score_records, validate_scoring,
    GeneralWeighting, ScoredRecord, ScoringConfig, UnknownAttributePolicy,
};
use crate::table::{load_table, InputError, RawTable};

/// Validated registry and general-score weighting for one run.
#[derive(Debug, Clone)]
pub struct ScoringSetup {
    pub registry: AttributeRegistry,
    pub weighting: GeneralWeighting,
}

/// Validate the scoring config and apply command-line overrides.
///
/// `general` replaces the configured general weighting; `strict` rejects
/// unknown attribute codes whatever the config says. All problems are
/// returned together.
pub fn setup_scoring(
    config: &ScoringConfig,
    general: Option<Position>,
    strict: bool,
) -> Result<ScoringSetup, Vec<String>> {
    validate_scoring(config)?;
    let registry = config
        .build_registry()
        .map_err(|e| vec![format!("scoring: {:#}", e)])?;

    let policy = if strict {
        UnknownAttributePolicy::Reject
    } else {
        config.policy()
    };
    for soft in check_soft_references(&registry, policy)? {
        warn!("{}", describe_soft_reference(&soft));
    }

    let weighting = match general {
        Some(position) => GeneralWeighting::Single(position),
        None => config
            .general_weighting()
            .map_err(|e| vec![format!("{:#}", e)])?,
    };
    if weighting == GeneralWeighting::AllPositions {
        debug!("Current_Score sums every position's weight table; shared attributes count once per table");
    }

    Ok(ScoringSetup {
        registry,
        weighting,
    })
}

/// Normalize and score a raw table. Output order matches input order.
pub fn score_table(table: &RawTable, setup: &ScoringSetup) -> Result<Vec<ScoredRecord>, InputError> {
    table.require_columns(&DISPLAY_COLUMNS)?;

    let normalized = normalize(table, &setup.registry);
    if normalized.attribute_columns.is_empty() {
        warn!("no attribute columns recognized; every score will be 0");
    }

    let scored = score_records(normalized.rows, &setup.registry, setup.weighting);
    info!(
        "scored {} players for {} positions (general score: {})",
        scored.len(),
        Position::ALL.len(),
        setup.weighting
    );
    Ok(scored)
}

/// Load an export and score it.
pub fn load_and_score(input: &Path, setup: &ScoringSetup) -> Result<Vec<ScoredRecord>, InputError> {
    let table = load_table(input)?;
    score_table(&table, setup)
}

/// Players whose name matches `query`: exact (ignoring case) matches if any,
/// otherwise every name containing it.
pub fn find_players<'a>(rows: &'a [ScoredRecord], query: &str) -> Vec<&'a ScoredRecord> {
    let query = query.trim().to_lowercase();
    let exact: Vec<_> = rows
        .iter()
        .filter(|r| r.record.name().to_lowercase() == query)
        .collect();
    if !exact.is_empty() {
        return exact;
    }
    rows.iter()
        .filter(|r| r.record.name().to_lowercase().contains(&query))
        .collect()
}
