use super::config::{PillarConfig, PillarTier};
use super::model::Feature;
use crate::statement::FinancialFeatures;

/// How many of sales and cash flow are reported and non-zero.
pub fn count_pillars(financial: &FinancialFeatures) -> u8 {
    let present = |value: Option<f64>| value.is_some_and(|v| v.is_finite() && v != 0.0);
    present(financial.sales) as u8 + present(financial.cash_flow) as u8
}

/// Weight multipliers and score ceiling for a pillar count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillarAdjustment {
    pub social_multiplier: f64,
    pub score_cap: f64,
}

impl PillarAdjustment {
    pub fn weight_multiplier(&self, feature: Feature) -> f64 {
        if feature.is_social() {
            self.social_multiplier
        } else {
            1.0
        }
    }
}

/// Social signals must not stand in for missing financials: with fewer
/// pillars, social weights shrink and the score is capped lower.
pub fn pillar_policy(pillars: u8, config: &PillarConfig) -> PillarAdjustment {
    let tier: PillarTier = match pillars {
        0 => config.none,
        1 => config.partial,
        _ => config.full,
    };
    PillarAdjustment {
        social_multiplier: tier.social_multiplier,
        score_cap: tier.cap,
    }
}
