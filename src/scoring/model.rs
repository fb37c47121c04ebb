use super::capital::CapitalConfig;
use super::config::{BandThresholds, Distribution, PillarConfig, ScoringConfig};
use super::validation::validate_scoring;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Features that enter the composite score, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Sales,
    CashFlow,
    CurrentSolvency,
    AssetTurnover,
    CashflowToDebt,
    Followers,
    Engagement,
    Sentiment,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::Sales,
        Feature::CashFlow,
        Feature::CurrentSolvency,
        Feature::AssetTurnover,
        Feature::CashflowToDebt,
        Feature::Followers,
        Feature::Engagement,
        Feature::Sentiment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Sales => "sales",
            Feature::CashFlow => "cash_flow",
            Feature::CurrentSolvency => "current_solvency",
            Feature::AssetTurnover => "asset_turnover",
            Feature::CashflowToDebt => "cashflow_to_debt",
            Feature::Followers => "followers",
            Feature::Engagement => "engagement",
            Feature::Sentiment => "sentiment",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    pub fn is_social(&self) -> bool {
        matches!(
            self,
            Feature::Followers | Feature::Engagement | Feature::Sentiment
        )
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated, resolved scoring configuration.
///
/// Built once at startup; every feature is guaranteed to have a reference
/// distribution and a weight, so scoring itself cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringModel {
    distributions: [Distribution; 8],
    weights: [f64; 8],
    pub pillars: PillarConfig,
    pub bands: BandThresholds,
    pub solvency_cap: f64,
    pub social_z_limit: f64,
    pub raw_limit: f64,
    pub top_factors: usize,
    pub capital: CapitalConfig,
    pub epsilon: f64,
}

impl ScoringModel {
    pub fn new(config: &ScoringConfig, epsilon: f64) -> Result<Self, ConfigError> {
        validate_scoring(config).map_err(ConfigError::Invalid)?;

        let distributions = Feature::ALL.map(|feature| {
            config
                .reference
                .get(feature.as_str())
                .copied()
                .unwrap_or(Distribution { mean: 0.0, std: 0.0 })
        });
        let weights = Feature::ALL.map(|feature| {
            config
                .weights
                .get(feature.as_str())
                .copied()
                .unwrap_or(0.0)
        });

        Ok(Self {
            distributions,
            weights,
            pillars: config.pillars.clone(),
            bands: config.bands,
            solvency_cap: config.solvency_cap,
            social_z_limit: config.social_z_limit,
            raw_limit: config.raw_limit,
            top_factors: config.top_factors,
            capital: config.capital.clone(),
            epsilon,
        })
    }

    pub fn distribution(&self, feature: Feature) -> Distribution {
        self.distributions[feature.index()]
    }

    pub fn base_weight(&self, feature: Feature) -> f64 {
        self.weights[feature.index()]
    }
}
