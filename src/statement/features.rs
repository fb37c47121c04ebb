use super::parser::FinancialLineItem;
use super::rules::{matching_concepts, Concept, ConceptRule};
use crate::numeric::safe_div;
use serde::{Deserialize, Serialize};

/// Canonical financial figures and the ratios derived from them.
///
/// `None` always means "not reported". A reported zero stays `Some(0.0)`
/// because the scorer treats absence and zero differently.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FinancialFeatures {
    pub sales: Option<f64>,
    pub cash_flow: Option<f64>,
    pub assets: Option<f64>,
    pub liabilities: Option<f64>,
    pub equity: Option<f64>,
    pub current_solvency: Option<f64>,
    pub asset_turnover: Option<f64>,
    pub cashflow_to_debt: Option<f64>,
}

impl FinancialFeatures {
    /// Build from base figures, deriving the ratios.
    pub fn from_figures(
        sales: Option<f64>,
        cash_flow: Option<f64>,
        assets: Option<f64>,
        liabilities: Option<f64>,
        equity: Option<f64>,
        epsilon: f64,
    ) -> Self {
        let mut features = Self {
            sales,
            cash_flow,
            assets,
            liabilities,
            equity,
            ..Self::default()
        };
        features.derive_ratios(epsilon);
        features
    }

    pub fn get(&self, concept: Concept) -> Option<f64> {
        match concept {
            Concept::Sales => self.sales,
            Concept::CashFlow => self.cash_flow,
            Concept::Assets => self.assets,
            Concept::Liabilities => self.liabilities,
            Concept::Equity => self.equity,
        }
    }

    fn slot(&mut self, concept: Concept) -> &mut Option<f64> {
        match concept {
            Concept::Sales => &mut self.sales,
            Concept::CashFlow => &mut self.cash_flow,
            Concept::Assets => &mut self.assets,
            Concept::Liabilities => &mut self.liabilities,
            Concept::Equity => &mut self.equity,
        }
    }

    /// Replace one base figure and recompute every ratio.
    pub fn with_override(mut self, concept: Concept, value: f64, epsilon: f64) -> Self {
        *self.slot(concept) = Some(value);
        self.derive_ratios(epsilon);
        self
    }

    fn derive_ratios(&mut self, epsilon: f64) {
        self.current_solvency = safe_div(self.assets, self.liabilities, epsilon);
        self.asset_turnover = safe_div(self.sales, self.assets, epsilon);
        self.cashflow_to_debt = safe_div(self.cash_flow, self.liabilities, epsilon);
    }

    /// True when no base figure was reported at all.
    pub fn is_empty(&self) -> bool {
        Concept::ALL.iter().all(|c| self.get(*c).is_none())
    }
}

/// Fold line items into features. Every item adds into each concept its
/// label matches; concepts with no match stay `None`.
pub fn fold_line_items(
    items: &[FinancialLineItem],
    rules: &[ConceptRule],
    epsilon: f64,
) -> FinancialFeatures {
    let mut features = FinancialFeatures::default();

    for item in items {
        for concept in matching_concepts(rules, &item.label) {
            let slot = features.slot(concept);
            *slot = Some(slot.unwrap_or(0.0) + item.value);
        }
    }

    features.derive_ratios(epsilon);
    features
}
