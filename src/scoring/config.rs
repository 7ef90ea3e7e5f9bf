use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::engine::GeneralWeighting;
use crate::registry::{defaults, AttributeRegistry, Position, WeightTable, DEFAULT_REFERENCE};

/// What to do with weight-table codes that aren't in the attribute catalog.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownAttributePolicy {
    /// Warn at startup; the code contributes 0 to every score.
    #[default]
    Tolerate,
    /// Refuse to start.
    Reject,
}

/// Scoring configuration.
///
/// Every field is optional; anything left out falls back to the built-in
/// registry.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   reference_position: CF
///   general_weighting: BPD
///   unknown_attributes: reject
///   weights:
///     CF:
///       Fin: 0.15
///       Otb: 0.10
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Replaces the attribute catalog entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<String>>,

    /// Position code -> (attribute code -> weight). A listed position replaces
    /// its built-in table; unlisted positions keep theirs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<BTreeMap<String, BTreeMap<String, f64>>>,

    /// Position whose table provides the shared normalization denominator
    /// (default: CF).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_position: Option<String>,

    /// Score `Current_Score` against one position's table instead of the sum
    /// of all tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_weighting: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown_attributes: Option<UnknownAttributePolicy>,
}

impl ScoringConfig {
    /// The built-in registry spelled out in full, for `init`.
    pub fn builtin() -> Self {
        let weights = Position::ALL
            .iter()
            .map(|p| {
                let table = defaults::weights_for(*p)
                    .iter()
                    .map(|(code, w)| (code.to_string(), *w))
                    .collect();
                (p.code().to_string(), table)
            })
            .collect();

        Self {
            attributes: Some(
                defaults::ATTRIBUTE_CODES
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            ),
            weights: Some(weights),
            reference_position: Some(DEFAULT_REFERENCE.code().to_string()),
            general_weighting: None,
            unknown_attributes: Some(UnknownAttributePolicy::Tolerate),
        }
    }

    pub fn policy(&self) -> UnknownAttributePolicy {
        self.unknown_attributes.unwrap_or_default()
    }

    pub fn general_weighting(&self) -> Result<GeneralWeighting> {
        match &self.general_weighting {
            None => Ok(GeneralWeighting::AllPositions),
            Some(p) => Ok(GeneralWeighting::Single(
                p.parse().context("scoring.general_weighting")?,
            )),
        }
    }

    /// Build the registry: built-ins overlaid with this config.
    pub fn build_registry(&self) -> Result<AttributeRegistry> {
        let attributes = match &self.attributes {
            Some(codes) => codes.clone(),
            None => defaults::ATTRIBUTE_CODES
                .iter()
                .map(|c| c.to_string())
                .collect(),
        };

        let mut tables: BTreeMap<Position, WeightTable> = Position::ALL
            .iter()
            .map(|p| (*p, WeightTable::from_pairs(defaults::weights_for(*p))))
            .collect();
        if let Some(ref weights) = self.weights {
            for (position, entries) in weights {
                let position: Position = position
                    .parse()
                    .with_context(|| format!("scoring.weights.{}", position))?;
                let entries = entries.iter().map(|(c, w)| (c.clone(), *w)).collect();
                tables.insert(position, WeightTable::new(entries));
            }
        }

        let reference = match &self.reference_position {
            Some(p) => p.parse().context("scoring.reference_position")?,
            None => DEFAULT_REFERENCE,
        };

        Ok(AttributeRegistry::new(attributes, tables, reference)?)
    }
}
