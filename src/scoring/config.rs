use super::capital::CapitalConfig;
use super::model::Feature;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main scoring configuration.
///
/// Defines the reference distribution each feature is normalized against,
/// the base weight of each feature, and the completeness policy. Every
/// section falls back to the built-in reference data when omitted, but a
/// section that is present replaces the default entirely, so a partial
/// `reference` map is reported as a configuration error.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   reference:
///     sales: { mean: 200000, std: 150000 }
///     followers: { mean: 3.2, std: 0.6 }   # log10 scale
///   weights:
///     sales: 0.20
///     engagement: 0.10
///   pillars:
///     none: { social_multiplier: 0.4, cap: 60 }
///     partial: { social_multiplier: 0.7, cap: 75 }
///     full: { social_multiplier: 1.0, cap: 100 }
///   bands:
///     low_risk_min: 70
///     medium_risk_min: 40
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Feature name to `(mean, std)` used for z-scores
    pub reference: BTreeMap<String, Distribution>,

    /// Feature name to base weight. Renormalized after pillar adjustment.
    pub weights: BTreeMap<String, f64>,

    /// Social down-weighting and score caps by financial completeness
    pub pillars: PillarConfig,

    /// Score thresholds separating risk bands
    pub bands: BandThresholds,

    /// Solvency above this is treated as this (default: 5.0)
    pub solvency_cap: f64,

    /// Social z-scores are clamped to +/- this (default: 3.0)
    pub social_z_limit: f64,

    /// Weighted composite is clamped to +/- this before rescaling (default: 2.5)
    pub raw_limit: f64,

    /// Number of factors reported in `top_factors` (default: 3)
    pub top_factors: usize,

    /// Relative capital and recommended limit estimate
    pub capital: CapitalConfig,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let reference = [
            (Feature::Sales, 200_000.0, 150_000.0),
            (Feature::CashFlow, 20_000.0, 15_000.0),
            (Feature::CurrentSolvency, 1.5, 0.6),
            (Feature::AssetTurnover, 1.0, 0.5),
            (Feature::CashflowToDebt, 0.3, 0.2),
            (Feature::Followers, 3.2, 0.6),
            (Feature::Engagement, 0.03, 0.02),
            (Feature::Sentiment, 0.2, 0.3),
        ]
        .into_iter()
        .map(|(feature, mean, std)| (feature.as_str().to_string(), Distribution { mean, std }))
        .collect();

        let weights = [
            (Feature::Sales, 0.20),
            (Feature::CashFlow, 0.20),
            (Feature::CurrentSolvency, 0.16),
            (Feature::AssetTurnover, 0.10),
            (Feature::CashflowToDebt, 0.12),
            (Feature::Followers, 0.06),
            (Feature::Engagement, 0.10),
            (Feature::Sentiment, 0.06),
        ]
        .into_iter()
        .map(|(feature, weight)| (feature.as_str().to_string(), weight))
        .collect();

        Self {
            reference,
            weights,
            pillars: PillarConfig::default(),
            bands: BandThresholds::default(),
            solvency_cap: 5.0,
            social_z_limit: 3.0,
            raw_limit: 2.5,
            top_factors: 3,
            capital: CapitalConfig::default(),
        }
    }
}

/// Reference mean and standard deviation of one feature.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Distribution {
    pub mean: f64,
    pub std: f64,
}

impl Distribution {
    /// `(x - mean) / std`, or 0 when the spread is not positive.
    pub fn z_score(&self, x: f64) -> f64 {
        if self.std <= 0.0 {
            0.0
        } else {
            (x - self.mean) / self.std
        }
    }
}

/// Adjustment applied for a given number of financial pillars.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PillarTier {
    /// Multiplier on every social weight
    pub social_multiplier: f64,
    /// Ceiling on the final score
    pub cap: f64,
}

/// Tiers for zero, one and two financial pillars (sales, cash flow).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PillarConfig {
    pub none: PillarTier,
    pub partial: PillarTier,
    pub full: PillarTier,
}

impl Default for PillarConfig {
    fn default() -> Self {
        Self {
            none: PillarTier {
                social_multiplier: 0.4,
                cap: 60.0,
            },
            partial: PillarTier {
                social_multiplier: 0.7,
                cap: 75.0,
            },
            full: PillarTier {
                social_multiplier: 1.0,
                cap: 100.0,
            },
        }
    }
}

/// `score >= low_risk_min` is low risk, `score >= medium_risk_min` medium,
/// anything below is high.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BandThresholds {
    pub low_risk_min: f64,
    pub medium_risk_min: f64,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            low_risk_min: 70.0,
            medium_risk_min: 40.0,
        }
    }
}
