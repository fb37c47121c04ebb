pub mod anchors;
pub mod config;
pub mod features;
pub mod parser;
pub mod rules;

pub use anchors::{AnchorRule, StatementKind};
pub use config::{validate_statement, StatementConfig};
pub use features::{fold_line_items, FinancialFeatures};
pub use parser::{parse_rows, read_csv_rows, FinancialLineItem, RawRow};
pub use rules::{normalize_label, Concept, ConceptRule};

use crate::error::InputError;
use serde::{Deserialize, Serialize};

/// The documents of one filing. Only the balance sheet is required.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StatementBundle {
    #[serde(default)]
    pub balance: Vec<RawRow>,
    #[serde(default)]
    pub income: Option<Vec<RawRow>>,
    #[serde(default)]
    pub cash_flow: Option<Vec<RawRow>>,
}

impl StatementBundle {
    pub fn from_balance(rows: Vec<RawRow>) -> Self {
        Self {
            balance: rows,
            ..Self::default()
        }
    }

    fn rows(&self, kind: StatementKind) -> Option<&[RawRow]> {
        match kind {
            StatementKind::Balance => Some(&self.balance),
            StatementKind::Income => self.income.as_deref(),
            StatementKind::CashFlow => self.cash_flow.as_deref(),
        }
    }
}

/// Parse one table of rows into features by summing matched concepts.
pub fn parse_statement(
    rows: &[RawRow],
    config: &StatementConfig,
) -> Result<FinancialFeatures, InputError> {
    let items = parse_rows(rows)?;
    tracing::debug!(rows = rows.len(), items = items.len(), "parsed statement rows");
    Ok(fold_line_items(&items, &config.concepts, config.epsilon))
}

/// Parse a full filing: sum the balance sheet, then let anchor lines from
/// the income and cash-flow statements override their concepts.
pub fn parse_bundle(
    bundle: &StatementBundle,
    config: &StatementConfig,
) -> Result<FinancialFeatures, InputError> {
    let mut features = parse_statement(&bundle.balance, config)?;

    for anchor in &config.anchors {
        let Some(rows) = bundle.rows(anchor.statement) else {
            continue;
        };
        let items = parse_rows(rows)?;
        if let Some(value) = anchor.find(&items) {
            tracing::debug!(concept = %anchor.concept, value, "anchor line overrides concept");
            features = features.with_override(anchor.concept, value, config.epsilon);
        }
    }

    Ok(features)
}
