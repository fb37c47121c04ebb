use super::capital::estimate_capital;
use super::config::BandThresholds;
use super::model::{Feature, ScoringModel};
use super::policy::{count_pillars, pillar_policy};
use crate::numeric::clamp;
use crate::social::SocialFeatures;
use crate::statement::FinancialFeatures;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk level. Low risk means creditworthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn from_score(score: f64, bands: &BandThresholds) -> Self {
        if score >= bands.low_risk_min {
            RiskBand::Low
        } else if score >= bands.medium_risk_min {
            RiskBand::Medium
        } else {
            RiskBand::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "low",
            RiskBand::Medium => "medium",
            RiskBand::High => "high",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FactorContribution {
    pub factor: Feature,
    pub weight: f64,           // Adjusted, renormalized weight
    pub normalized_value: f64, // z-score after clamping
    pub contribution: f64,     // weight * normalized_value
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoreBreakdown {
    pub pillars: u8,
    pub score_cap: f64,
    /// Weighted sum before clamping and rescaling
    pub raw: f64,
    /// True when the pillar cap lowered the score
    pub capped: bool,
    /// One entry per feature in `Feature::ALL` order
    pub factors: Vec<FactorContribution>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RiskResult {
    pub score: f64,
    pub band: RiskBand,
    pub top_factors: Vec<String>,
    pub capital_relative: f64,
    pub credit_limit_recommended: f64,
    pub breakdown: ScoreBreakdown,
}

/// Missing (or non-finite) values count as zero for scoring only.
fn or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Feature values after the scoring transforms, in `Feature::ALL` order.
fn transformed_values(
    financial: &FinancialFeatures,
    social: &SocialFeatures,
    model: &ScoringModel,
) -> [f64; 8] {
    let solvency = or_zero(financial.current_solvency);
    let solvency = if solvency > 0.0 {
        solvency.min(model.solvency_cap)
    } else {
        solvency
    };
    let followers = or_zero(social.followers).max(1.0).log10();

    Feature::ALL.map(|feature| match feature {
        Feature::Sales => or_zero(financial.sales),
        Feature::CashFlow => or_zero(financial.cash_flow),
        Feature::CurrentSolvency => solvency,
        Feature::AssetTurnover => or_zero(financial.asset_turnover),
        Feature::CashflowToDebt => or_zero(financial.cashflow_to_debt),
        Feature::Followers => followers,
        Feature::Engagement => or_zero(social.engagement),
        Feature::Sentiment => or_zero(Some(social.sentiment)),
    })
}

pub fn calculate_score(
    financial: &FinancialFeatures,
    social: &SocialFeatures,
    model: &ScoringModel,
) -> RiskResult {
    let pillars = count_pillars(financial);
    let adjustment = pillar_policy(pillars, &model.pillars);
    let values = transformed_values(financial, social, model);

    // Adjusted weights, renormalized to sum to 1
    let adjusted = Feature::ALL.map(|f| model.base_weight(f) * adjustment.weight_multiplier(f));
    let total: f64 = adjusted.iter().sum();
    let weights = adjusted.map(|w| if total > 0.0 { w / total } else { w });

    let factors: Vec<FactorContribution> = Feature::ALL
        .iter()
        .zip(values)
        .zip(weights)
        .map(|((feature, value), weight)| {
            let z = model.distribution(*feature).z_score(value);
            let z = if feature.is_social() {
                clamp(z, -model.social_z_limit, model.social_z_limit)
            } else {
                z
            };
            FactorContribution {
                factor: *feature,
                weight,
                normalized_value: z,
                contribution: z * weight,
            }
        })
        .collect();

    let raw: f64 = factors.iter().map(|f| f.contribution).sum();
    let limit = model.raw_limit;
    let uncapped = (clamp(raw, -limit, limit) + limit) / (2.0 * limit) * 100.0;
    let score = uncapped.min(adjustment.score_cap);
    let band = RiskBand::from_score(score, &model.bands);

    let (capital_relative, credit_limit_recommended) =
        estimate_capital(financial, score, &model.capital, model.epsilon);

    tracing::debug!(pillars, raw, score, band = %band, "scored feature set");

    RiskResult {
        score,
        band,
        top_factors: top_factors(&factors, model.top_factors),
        capital_relative,
        credit_limit_recommended,
        breakdown: ScoreBreakdown {
            pillars,
            score_cap: adjustment.score_cap,
            raw,
            capped: uncapped > score,
            factors,
        },
    }
}

/// Largest signed contributions first, rendered as `"sales +0.12"`.
fn top_factors(factors: &[FactorContribution], count: usize) -> Vec<String> {
    let mut ranked: Vec<&FactorContribution> = factors.iter().collect();
    ranked.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
    ranked
        .into_iter()
        .take(count)
        .map(|f| format!("{} {:+.2}", f.factor, f.contribution))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::DEFAULT_EPSILON;
    use crate::scoring::config::{Distribution, ScoringConfig};

    fn model() -> ScoringModel {
        ScoringModel::new(&ScoringConfig::default(), DEFAULT_EPSILON).unwrap()
    }

    fn financial(sales: Option<f64>, cash_flow: Option<f64>) -> FinancialFeatures {
        FinancialFeatures::from_figures(
            sales,
            cash_flow,
            Some(90_000.0),
            Some(60_000.0),
            None,
            DEFAULT_EPSILON,
        )
    }

    fn strong_social() -> SocialFeatures {
        SocialFeatures {
            followers: Some(1_000_000.0),
            following: None,
            posts: Some(500.0),
            avg_likes: 5_000.0,
            avg_comments: 500.0,
            engagement: Some(0.5),
            sentiment: 1.0,
        }
    }

    #[test]
    fn test_band_thresholds_inclusive_low() {
        let bands = BandThresholds::default();
        assert_eq!(RiskBand::from_score(70.0, &bands), RiskBand::Low);
        assert_eq!(RiskBand::from_score(69.99, &bands), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(40.0, &bands), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(39.99, &bands), RiskBand::High);
    }

    #[test]
    fn test_reference_means_score_fifty() {
        // Every feature at its reference mean gives z = 0 everywhere.
        let financial = FinancialFeatures {
            sales: Some(200_000.0),
            cash_flow: Some(20_000.0),
            current_solvency: Some(1.5),
            asset_turnover: Some(1.0),
            cashflow_to_debt: Some(0.3),
            ..FinancialFeatures::default()
        };
        let social = SocialFeatures {
            followers: Some(10f64.powf(3.2)),
            engagement: Some(0.03),
            sentiment: 0.2,
            ..SocialFeatures::default()
        };
        let result = calculate_score(&financial, &social, &model());
        assert!((result.score - 50.0).abs() < 1e-9);
        assert_eq!(result.band, RiskBand::Medium);
        assert_eq!(result.breakdown.pillars, 2);
        assert!(!result.breakdown.capped);
    }

    #[test]
    fn test_zero_pillars_capped_at_sixty() {
        let financial = FinancialFeatures::default();
        let result = calculate_score(&financial, &strong_social(), &model());
        assert!(result.score <= 60.0);
        assert_eq!(result.breakdown.pillars, 0);
        assert_eq!(result.breakdown.score_cap, 60.0);
    }

    #[test]
    fn test_one_pillar_capped_at_seventy_five() {
        let rich = FinancialFeatures {
            sales: Some(5_000_000.0),
            current_solvency: Some(5.0),
            asset_turnover: Some(3.0),
            ..FinancialFeatures::default()
        };
        let result = calculate_score(&rich, &strong_social(), &model());
        assert_eq!(result.breakdown.pillars, 1);
        assert_eq!(result.score, 75.0);
        assert!(result.breakdown.capped);
        assert_eq!(result.band, RiskBand::Low);
    }

    #[test]
    fn test_social_weights_reduced_without_pillars() {
        let result = calculate_score(&FinancialFeatures::default(), &strong_social(), &model());
        let weight = |feature: Feature| {
            result
                .breakdown
                .factors
                .iter()
                .find(|f| f.factor == feature)
                .unwrap()
                .weight
        };
        let total = 0.20 + 0.20 + 0.16 + 0.10 + 0.12 + 0.4 * (0.06 + 0.10 + 0.06);
        assert!((weight(Feature::Engagement) - 0.04 / total).abs() < 1e-12);
        assert!((weight(Feature::Sales) - 0.20 / total).abs() < 1e-12);
        let sum: f64 = result.breakdown.factors.iter().map(|f| f.weight).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_social_z_scores_clamped() {
        let result = calculate_score(&financial(None, None), &strong_social(), &model());
        for factor in &result.breakdown.factors {
            if factor.factor.is_social() {
                assert!(factor.normalized_value.abs() <= 3.0);
            }
        }
        let engagement = result
            .breakdown
            .factors
            .iter()
            .find(|f| f.factor == Feature::Engagement)
            .unwrap();
        assert_eq!(engagement.normalized_value, 3.0);
    }

    #[test]
    fn test_solvency_capped_before_scoring() {
        let mut huge = financial(Some(100_000.0), Some(10_000.0));
        huge.current_solvency = Some(500.0);
        let mut capped = huge.clone();
        capped.current_solvency = Some(5.0);
        let social = SocialFeatures::default();
        let a = calculate_score(&huge, &social, &model());
        let b = calculate_score(&capped, &social, &model());
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn test_score_bounds_with_extreme_inputs() {
        let terrible = FinancialFeatures {
            sales: Some(-1e12),
            cash_flow: Some(-1e12),
            current_solvency: Some(-50.0),
            ..FinancialFeatures::default()
        };
        let result = calculate_score(&terrible, &SocialFeatures::default(), &model());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.band, RiskBand::High);

        let stellar = FinancialFeatures {
            sales: Some(1e12),
            cash_flow: Some(1e12),
            ..FinancialFeatures::default()
        };
        let result = calculate_score(&stellar, &strong_social(), &model());
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn test_top_factors_format_and_order() {
        let result = calculate_score(
            &financial(Some(80_000.0), Some(6_000.0)),
            &SocialFeatures::default(),
            &model(),
        );
        assert_eq!(result.top_factors.len(), 3);
        let mut sorted = result.breakdown.factors.clone();
        sorted.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
        let expected = format!("{} {:+.2}", sorted[0].factor, sorted[0].contribution);
        assert_eq!(result.top_factors[0], expected);
        for entry in &result.top_factors {
            let value = entry.rsplit(' ').next().unwrap();
            assert!(value.starts_with('+') || value.starts_with('-'));
        }
    }

    #[test]
    fn test_gaining_a_pillar_can_lower_the_score() {
        // With weak social signals, a second pillar restores full social
        // weight and the score drops.
        let social = SocialFeatures::default();
        let one_pillar = calculate_score(&financial(Some(0.0), Some(6_000.0)), &social, &model());
        let two_pillars = calculate_score(&financial(Some(1.0), Some(6_000.0)), &social, &model());

        assert_eq!(one_pillar.breakdown.pillars, 1);
        assert_eq!(two_pillars.breakdown.pillars, 2);
        assert!(two_pillars.score < one_pillar.score);
        assert!((one_pillar.score - 27.894).abs() < 0.01);
        assert!((two_pillars.score - 27.133).abs() < 0.01);

        let more_sales = calculate_score(&financial(Some(2.0), Some(6_000.0)), &social, &model());
        assert!(more_sales.score >= two_pillars.score);
    }

    #[test]
    fn test_top_factors_ties_keep_feature_order() {
        let features = [Feature::Sales, Feature::CashFlow, Feature::Followers];
        let factors: Vec<FactorContribution> = features
            .into_iter()
            .map(|factor| FactorContribution {
                factor,
                weight: 0.1,
                normalized_value: 1.0,
                contribution: 0.1,
            })
            .collect();
        assert_eq!(
            top_factors(&factors, 2),
            vec!["sales +0.10".to_string(), "cash_flow +0.10".to_string()]
        );
    }

    #[test]
    fn test_zero_std_neutralizes_feature() {
        let mut config = ScoringConfig::default();
        config
            .reference
            .insert("sales".to_string(), Distribution { mean: 1.0, std: 0.0 });
        let model = ScoringModel::new(&config, DEFAULT_EPSILON).unwrap();
        let result = calculate_score(
            &financial(Some(1e9), Some(1.0)),
            &SocialFeatures::default(),
            &model,
        );
        assert_eq!(result.breakdown.factors[0].normalized_value, 0.0);
    }

    #[test]
    fn test_identical_inputs_identical_output() {
        let financial = financial(Some(80_000.0), Some(6_000.0));
        let social = strong_social();
        let a = calculate_score(&financial, &social, &model());
        let b = calculate_score(&financial, &social, &model());
        assert_eq!(a.score.to_bits(), b.score.to_bits());
        assert_eq!(a, b);
    }
}
