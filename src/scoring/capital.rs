use crate::numeric::clamp;
use crate::statement::FinancialFeatures;
use serde::{Deserialize, Serialize};

/// Constants for the relative capital and recommended limit estimate.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CapitalConfig {
    /// Solvency at or below this contributes nothing
    pub solvency_floor: f64,
    /// Solvency range mapped onto one unit of normalized solvency
    pub solvency_span: f64,
    /// Upper bound of normalized solvency
    pub solvency_norm_max: f64,
    /// Share of normalized solvency in the base estimate; the cash-flow
    /// margin gets the rest
    pub solvency_share: f64,
    /// Score multiplier is `score_floor + (1 - score_floor) * score / 100`
    pub score_floor: f64,
    /// Upper bound of `capital_relative`
    pub capital_max: f64,
    /// Limit as a share of sales at score 0
    pub limit_base_ratio: f64,
    /// Extra share of sales added at score 100
    pub limit_score_ratio: f64,
}

impl Default for CapitalConfig {
    fn default() -> Self {
        Self {
            solvency_floor: 0.5,
            solvency_span: 1.5,
            solvency_norm_max: 2.0,
            solvency_share: 0.5,
            score_floor: 0.6,
            capital_max: 1.5,
            limit_base_ratio: 0.10,
            limit_score_ratio: 0.20,
        }
    }
}

/// Returns `(capital_relative, credit_limit_recommended)`.
pub fn estimate_capital(
    financial: &FinancialFeatures,
    score: f64,
    config: &CapitalConfig,
    epsilon: f64,
) -> (f64, f64) {
    let known = |v: Option<f64>| v.filter(|x| x.is_finite()).unwrap_or(0.0);
    let sales = known(financial.sales);
    let cash_flow = known(financial.cash_flow);
    let solvency = known(financial.current_solvency);

    let margin = if sales > 0.0 {
        cash_flow / (sales + epsilon)
    } else {
        0.0
    };
    let solvency_norm = if config.solvency_span > 0.0 {
        clamp(
            (solvency - config.solvency_floor) / config.solvency_span,
            0.0,
            config.solvency_norm_max,
        )
    } else {
        0.0
    };

    let base = config.solvency_share * solvency_norm
        + (1.0 - config.solvency_share) * clamp(margin, 0.0, 1.0);
    let score_factor = config.score_floor + (1.0 - config.score_floor) * (score / 100.0);
    let capital_relative = clamp(base * score_factor, 0.0, config.capital_max);

    let ratio = config.limit_base_ratio + config.limit_score_ratio * (score / 100.0);
    let credit_limit = sales * ratio;

    (capital_relative, credit_limit)
}

pub fn validate_capital(config: &CapitalConfig) -> Vec<String> {
    let mut errors = Vec::new();
    let fields = [
        ("solvency_floor", config.solvency_floor),
        ("solvency_span", config.solvency_span),
        ("solvency_norm_max", config.solvency_norm_max),
        ("solvency_share", config.solvency_share),
        ("score_floor", config.score_floor),
        ("capital_max", config.capital_max),
        ("limit_base_ratio", config.limit_base_ratio),
        ("limit_score_ratio", config.limit_score_ratio),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            errors.push(format!("scoring.capital.{}: must be a finite number", name));
        }
    }
    if config.solvency_span <= 0.0 {
        errors.push("scoring.capital.solvency_span: must be positive".to_string());
    }
    if !(0.0..=1.0).contains(&config.solvency_share) {
        errors.push("scoring.capital.solvency_share: must be between 0 and 1".to_string());
    }
    if !(0.0..=1.0).contains(&config.score_floor) {
        errors.push("scoring.capital.score_floor: must be between 0 and 1".to_string());
    }
    errors
}
