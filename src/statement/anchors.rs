use super::parser::FinancialLineItem;
use super::rules::{normalize_label, Concept};
use serde::{Deserialize, Serialize};

/// Which document of a filing a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Balance,
    Income,
    CashFlow,
}

/// A single authoritative line that overrides a summed concept.
///
/// The income statement's revenue line is more reliable than whatever the
/// balance sheet happens to label as sales, and likewise for operating cash
/// flow in the cash-flow statement.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnchorRule {
    pub concept: Concept,
    pub statement: StatementKind,
    #[serde(default)]
    pub codes: Vec<String>,
    #[serde(default)]
    pub titles: Vec<String>,
    /// Keep looking past rows whose value is zero.
    #[serde(default)]
    pub skip_zero: bool,
}

impl AnchorRule {
    fn matches(&self, item: &FinancialLineItem) -> bool {
        let code_hit = item
            .code
            .as_deref()
            .is_some_and(|code| self.codes.iter().any(|c| c.trim() == code));
        code_hit
            || self
                .titles
                .iter()
                .any(|title| item.label.contains(&normalize_label(title)))
    }

    /// Value of the first matching item, in document order.
    pub fn find(&self, items: &[FinancialLineItem]) -> Option<f64> {
        items
            .iter()
            .filter(|item| !(self.skip_zero && item.value == 0.0))
            .find(|item| self.matches(item))
            .map(|item| item.value)
    }
}

pub fn default_anchor_rules() -> Vec<AnchorRule> {
    vec![
        AnchorRule {
            concept: Concept::Sales,
            statement: StatementKind::Income,
            codes: vec!["401".to_string()],
            titles: vec!["INGRESOS DE ACTIVIDADES ORDINARIAS".to_string()],
            skip_zero: false,
        },
        AnchorRule {
            concept: Concept::CashFlow,
            statement: StatementKind::CashFlow,
            codes: vec!["9820".to_string()],
            titles: vec![
                "FLUJOS DE EFECTIVO NETOS PROCEDENTES DE (UTILIZADOS EN) ACTIVIDADES DE OPERACIÓN"
                    .to_string(),
            ],
            skip_zero: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str, code: Option<&str>, value: f64) -> FinancialLineItem {
        FinancialLineItem {
            label: label.to_string(),
            code: code.map(str::to_string),
            value,
        }
    }

    #[test]
    fn test_anchor_by_code() {
        let rules = default_anchor_rules();
        let items = vec![
            item("COSTO DE VENTAS", Some("501"), 10.0),
            item("INGRESOS", Some("401"), 120_000.0),
        ];
        assert_eq!(rules[0].find(&items), Some(120_000.0));
    }

    #[test]
    fn test_anchor_by_title() {
        let rules = default_anchor_rules();
        let items = vec![item("INGRESOS DE ACTIVIDADES ORDINARIAS", None, 95_000.0)];
        assert_eq!(rules[0].find(&items), Some(95_000.0));
    }

    #[test]
    fn test_cash_flow_anchor_skips_zero_rows() {
        let rules = default_anchor_rules();
        let items = vec![
            item("FLUJOS DE EFECTIVO", Some("9820"), 0.0),
            item("FLUJOS DE EFECTIVO NETOS", Some("9820"), 7_500.0),
        ];
        assert_eq!(rules[1].find(&items), Some(7_500.0));
    }

    #[test]
    fn test_sales_anchor_accepts_zero() {
        let rules = default_anchor_rules();
        let items = vec![item("INGRESOS", Some("401"), 0.0)];
        assert_eq!(rules[0].find(&items), Some(0.0));
    }

    #[test]
    fn test_no_anchor_found() {
        let rules = default_anchor_rules();
        let items = vec![item("GASTOS", Some("502"), 5.0)];
        assert_eq!(rules[0].find(&items), None);
        assert_eq!(rules[1].find(&items), None);
    }
}
