use serde::{Deserialize, Serialize};

/// Actionable feedback attached to a credit decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    LowScore,
    AmountOverSalesCap { max_share_of_sales: f64 },
    LowDebtCoverage { min_dscr: f64 },
    LowSolvency { min_solvency: f64 },
    NegativeSentiment,
    LowEngagement,
    SolidProfile,
    IncompleteData,
}

impl Insight {
    pub fn message(&self) -> String {
        match self {
            Insight::LowScore => {
                "Improve the risk score: strengthen cash flow and digital reputation.".to_string()
            }
            Insight::AmountOverSalesCap { max_share_of_sales } => format!(
                "Reduce the requested amount below {}% of sales.",
                (max_share_of_sales * 100.0).round() as i64
            ),
            Insight::LowDebtCoverage { min_dscr } => format!(
                "Increase operating cash flow or extend the term to improve coverage (DSCR >= {}).",
                min_dscr
            ),
            Insight::LowSolvency { min_solvency } => {
                format!("Improve solvency (assets/liabilities >= {}).", min_solvency)
            }
            Insight::NegativeSentiment => {
                "Address complaints on social media to raise average sentiment.".to_string()
            }
            Insight::LowEngagement => {
                "Increase engagement with regular posts and useful content.".to_string()
            }
            Insight::SolidProfile => "Solid profile. Keep up the current performance.".to_string(),
            Insight::IncompleteData => {
                "Complete financial and social data to improve the evaluation.".to_string()
            }
        }
    }
}
