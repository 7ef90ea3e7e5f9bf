use std::collections::HashSet;

use super::config::{ScoringConfig, UnknownAttributePolicy};
use crate::registry::{AttributeRegistry, Position, SoftReference};

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref attributes) = config.attributes {
        if attributes.is_empty() {
            errors.push("scoring.attributes: must list at least one attribute code".to_string());
        }
        let mut seen = HashSet::new();
        for (i, code) in attributes.iter().enumerate() {
            if code.trim().is_empty() {
                errors.push(format!("scoring.attributes[{}]: empty attribute code", i));
            } else if !seen.insert(code.as_str()) {
                errors.push(format!("scoring.attributes[{}]: duplicate code '{}'", i, code));
            }
        }
    }

    if let Some(ref weights) = config.weights {
        for (position, table) in weights {
            if let Err(e) = position.parse::<Position>() {
                errors.push(format!("scoring.weights.{}: {}", position, e));
            }
            for (code, weight) in table {
                if !weight.is_finite() || *weight <= 0.0 {
                    errors.push(format!(
                        "scoring.weights.{}.{}: weight must be a positive number, got {}",
                        position, code, weight
                    ));
                }
            }
        }
    }

    if let Some(ref reference) = config.reference_position {
        if let Err(e) = reference.parse::<Position>() {
            errors.push(format!("scoring.reference_position: {}", e));
        }
    }

    if let Some(ref general) = config.general_weighting {
        if let Err(e) = general.parse::<Position>() {
            errors.push(format!("scoring.general_weighting: {}", e));
        }
    }

    // Only worth building once the pieces above parse.
    if errors.is_empty() {
        if let Err(e) = config.build_registry() {
            errors.push(format!("scoring: {:#}", e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Human-readable description of a soft reference.
pub fn describe_soft_reference(soft: &SoftReference) -> String {
    match soft.suggestion {
        Some(ref s) => format!(
            "scoring.weights.{}.{}: not a known attribute code (did you mean '{}'?); it contributes 0",
            soft.position, soft.code, s
        ),
        None => format!(
            "scoring.weights.{}.{}: not a known attribute code; it contributes 0",
            soft.position, soft.code
        ),
    }
}

/// Apply the unknown-attribute policy to a built registry.
///
/// Under `tolerate` the soft references are returned for the caller to log;
/// under `reject` any soft reference is an error.
pub fn check_soft_references(
    registry: &AttributeRegistry,
    policy: UnknownAttributePolicy,
) -> Result<Vec<SoftReference>, Vec<String>> {
    let soft = registry.soft_references();
    match policy {
        UnknownAttributePolicy::Tolerate => Ok(soft),
        UnknownAttributePolicy::Reject if soft.is_empty() => Ok(soft),
        UnknownAttributePolicy::Reject => Err(soft.iter().map(describe_soft_reference).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn weights(position: &str, entries: &[(&str, f64)]) -> Option<BTreeMap<String, BTreeMap<String, f64>>> {
        let table = entries.iter().map(|(c, w)| (c.to_string(), *w)).collect();
        let mut map = BTreeMap::new();
        map.insert(position.to_string(), table);
        Some(map)
    }

    #[test]
    fn test_valid_config() {
        let config = ScoringConfig {
            weights: weights("CF", &[("Fin", 0.5), ("Otb", 0.5)]),
            reference_position: Some("CF".to_string()),
            ..Default::default()
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_empty_config() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_builtin_config_is_valid() {
        assert!(validate_scoring(&ScoringConfig::builtin()).is_ok());
    }

    #[test]
    fn test_unknown_position() {
        let config = ScoringConfig {
            weights: weights("ST", &[("Fin", 1.0)]),
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.weights.ST"));
    }

    #[test]
    fn test_non_positive_weight() {
        let config = ScoringConfig {
            weights: weights("DM", &[("Tck", 0.0), ("Pos", -1.0)]),
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.contains("must be a positive number")));
    }

    #[test]
    fn test_duplicate_and_empty_attributes() {
        let config = ScoringConfig {
            attributes: Some(vec!["Pas".to_string(), "Pas".to_string(), " ".to_string()]),
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("duplicate code 'Pas'"));
        assert!(errors[1].contains("empty attribute code"));
    }

    #[test]
    fn test_zero_reference_denominator() {
        let config = ScoringConfig {
            weights: weights("CF", &[]),
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("maximum possible score"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            reference_position: Some("XX".to_string()),
            general_weighting: Some("YY".to_string()),
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_soft_references_tolerated() {
        let registry = AttributeRegistry::builtin();
        let soft = check_soft_references(&registry, UnknownAttributePolicy::Tolerate).unwrap();
        assert_eq!(soft.len(), 6);
    }

    #[test]
    fn test_soft_references_rejected() {
        let registry = AttributeRegistry::builtin();
        let errors = check_soft_references(&registry, UnknownAttributePolicy::Reject).unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(errors
            .iter()
            .any(|e| e.contains("scoring.weights.CF.OtB") && e.contains("did you mean 'Otb'")));
    }

    #[test]
    fn test_reject_passes_clean_registry() {
        let registry = AttributeRegistry::builtin()
            .with_table(
                Position::CF,
                crate::registry::WeightTable::from_pairs(&[("Fin", 1.0)]),
            )
            .and_then(|r| r.with_table(Position::CB, crate::registry::WeightTable::from_pairs(&[("Mar", 1.0)])))
            .and_then(|r| r.with_table(Position::BPD, crate::registry::WeightTable::from_pairs(&[("Mar", 1.0)])))
            .and_then(|r| r.with_table(Position::IW, crate::registry::WeightTable::from_pairs(&[("Dri", 1.0)])))
            .and_then(|r| r.with_table(Position::GK, crate::registry::WeightTable::from_pairs(&[("Ref", 1.0)])))
            .unwrap();
        let soft = check_soft_references(&registry, UnknownAttributePolicy::Reject).unwrap();
        assert!(soft.is_empty());
    }
}
