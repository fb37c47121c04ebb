use super::anchors::{default_anchor_rules, AnchorRule};
use super::rules::{default_concept_rules, ConceptRule};
use crate::numeric::DEFAULT_EPSILON;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Statement parsing configuration.
///
/// Example YAML:
/// ```yaml
/// statement:
///   epsilon: 1.0e-9
///   concepts:
///     - concept: sales
///       synonyms: ["VENTAS", "INGRESOS"]
///   anchors:
///     - concept: sales
///       statement: income
///       codes: ["401"]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StatementConfig {
    /// Stabilizer added to both sides of every ratio.
    pub epsilon: f64,
    /// Concept to synonym table. Order only matters for reporting.
    pub concepts: Vec<ConceptRule>,
    /// Authoritative lines that override summed concepts.
    pub anchors: Vec<AnchorRule>,
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            concepts: default_concept_rules(),
            anchors: default_anchor_rules(),
        }
    }
}

pub fn validate_statement(config: &StatementConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if !config.epsilon.is_finite() || config.epsilon < 0.0 {
        errors.push("statement.epsilon: must be a finite, non-negative number".to_string());
    }

    let mut seen = HashSet::new();
    for (i, rule) in config.concepts.iter().enumerate() {
        if !seen.insert(rule.concept) {
            errors.push(format!(
                "statement.concepts[{}]: concept '{}' is listed more than once",
                i, rule.concept
            ));
        }
        if rule.synonyms.is_empty() {
            errors.push(format!(
                "statement.concepts[{}].synonyms: must not be empty",
                i
            ));
        }
        for (j, synonym) in rule.synonyms.iter().enumerate() {
            if synonym.trim().is_empty() {
                errors.push(format!(
                    "statement.concepts[{}].synonyms[{}]: must not be blank",
                    i, j
                ));
            }
        }
    }

    for (i, anchor) in config.anchors.iter().enumerate() {
        if anchor.codes.is_empty() && anchor.titles.is_empty() {
            errors.push(format!(
                "statement.anchors[{}]: needs at least one code or title",
                i
            ));
        }
        if anchor.titles.iter().any(|t| t.trim().is_empty()) {
            errors.push(format!("statement.anchors[{}].titles: must not be blank", i));
        }
    }

    errors
}
