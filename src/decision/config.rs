use crate::scoring::RiskBand;
use serde::{Deserialize, Serialize};

/// Credit decision thresholds.
///
/// Example YAML:
/// ```yaml
/// decision:
///   min_score: 40
///   min_dscr: 1.2
///   debt_service_rate: 0.25
///   max_sales_ratio: { low: 0.35, medium: 0.22, high: 0.12 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DecisionConfig {
    /// Minimum risk score for approval
    pub min_score: f64,
    /// Minimum debt-service coverage ratio
    pub min_dscr: f64,
    /// Minimum assets/liabilities, enforced only when solvency is known
    pub min_solvency: f64,
    /// Share of the requested amount serviced per year
    pub debt_service_rate: f64,
    /// Largest share of sales that may be lent, by risk band
    pub max_sales_ratio: BandRatios,
    /// Sentiment below this triggers a reputation insight
    pub min_sentiment: f64,
    /// Engagement below this (or unknown) triggers an activity insight
    pub min_engagement: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            min_score: 40.0,
            min_dscr: 1.2,
            min_solvency: 1.2,
            debt_service_rate: 0.20,
            max_sales_ratio: BandRatios::default(),
            min_sentiment: 0.0,
            min_engagement: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BandRatios {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for BandRatios {
    fn default() -> Self {
        Self {
            low: 0.35,
            medium: 0.22,
            high: 0.12,
        }
    }
}

impl BandRatios {
    pub fn for_band(&self, band: RiskBand) -> f64 {
        match band {
            RiskBand::Low => self.low,
            RiskBand::Medium => self.medium,
            RiskBand::High => self.high,
        }
    }
}

/// Validate decision configuration at startup.
pub fn validate_decision(config: &DecisionConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if !config.debt_service_rate.is_finite() || config.debt_service_rate <= 0.0 {
        errors.push("decision.debt_service_rate: must be a positive number".to_string());
    }
    if !(0.0..=100.0).contains(&config.min_score) {
        errors.push("decision.min_score: must be between 0 and 100".to_string());
    }
    for (name, value) in [
        ("min_dscr", config.min_dscr),
        ("min_solvency", config.min_solvency),
        ("min_sentiment", config.min_sentiment),
        ("min_engagement", config.min_engagement),
    ] {
        if !value.is_finite() {
            errors.push(format!("decision.{}: must be a finite number", name));
        }
    }
    for (name, ratio) in [
        ("low", config.max_sales_ratio.low),
        ("medium", config.max_sales_ratio.medium),
        ("high", config.max_sales_ratio.high),
    ] {
        if !ratio.is_finite() || ratio < 0.0 {
            errors.push(format!(
                "decision.max_sales_ratio.{}: must be a finite, non-negative number",
                name
            ));
        }
    }

    errors
}
