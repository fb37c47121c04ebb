use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical financial concepts recognised in statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Concept {
    Sales,
    CashFlow,
    Assets,
    Liabilities,
    Equity,
}

impl Concept {
    pub const ALL: [Concept; 5] = [
        Concept::Sales,
        Concept::CashFlow,
        Concept::Assets,
        Concept::Liabilities,
        Concept::Equity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Concept::Sales => "sales",
            Concept::CashFlow => "cash_flow",
            Concept::Assets => "assets",
            Concept::Liabilities => "liabilities",
            Concept::Equity => "equity",
        }
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synonym list for one concept.
///
/// A normalized label matches when it contains any synonym. Synonyms are
/// compared after the same normalization labels go through, so they can be
/// written in any case.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConceptRule {
    pub concept: Concept,
    pub synonyms: Vec<String>,
}

impl ConceptRule {
    pub fn new(concept: Concept, synonyms: &[&str]) -> Self {
        Self {
            concept,
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// First synonym contained in the label, if any.
    pub fn matched_synonym(&self, normalized_label: &str) -> Option<&str> {
        self.synonyms
            .iter()
            .map(String::as_str)
            .find(|synonym| normalized_label.contains(&normalize_label(synonym)))
    }

    pub fn matches(&self, normalized_label: &str) -> bool {
        self.matched_synonym(normalized_label).is_some()
    }
}

/// Default rule table for Spanish-language statements.
pub fn default_concept_rules() -> Vec<ConceptRule> {
    vec![
        ConceptRule::new(
            Concept::Sales,
            &[
                "VENTAS",
                "VENTAS NETAS",
                "INGRESOS",
                "INGRESOS OPERACIONALES",
                "INGRESOS POR VENTAS",
            ],
        ),
        ConceptRule::new(
            Concept::CashFlow,
            &[
                "FLUJO DE CAJA",
                "FLUJO CAJA",
                "CASH FLOW",
                "FLUJO DE EFECTIVO",
                "FLUJO DE EFECTIVO OPERATIVO",
            ],
        ),
        ConceptRule::new(
            Concept::Assets,
            &["TOTAL ACTIVOS", "ACTIVOS", "ACTIVO TOTAL", "ACTIVO"],
        ),
        ConceptRule::new(
            Concept::Liabilities,
            &["TOTAL PASIVOS", "PASIVOS", "PASIVO TOTAL", "PASIVO"],
        ),
        ConceptRule::new(
            Concept::Equity,
            &["PATRIMONIO", "PATRIMONIO NETO", "CAPITAL"],
        ),
    ]
}

/// Concepts a label contributes to. One row may feed several concepts.
pub fn matching_concepts<'a>(
    rules: &'a [ConceptRule],
    normalized_label: &'a str,
) -> impl Iterator<Item = Concept> + 'a {
    rules
        .iter()
        .filter(move |rule| rule.matches(normalized_label))
        .map(|rule| rule.concept)
}

/// Uppercase, drop a leading run of digits left over from account codes,
/// and collapse whitespace.
pub fn normalize_label(raw: &str) -> String {
    let upper = raw.to_uppercase();
    let without_code = upper
        .trim_start()
        .trim_start_matches(|c: char| c.is_ascii_digit());
    without_code.split_whitespace().collect::<Vec<_>>().join(" ")
}
