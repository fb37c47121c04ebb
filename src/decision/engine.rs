use super::config::DecisionConfig;
use super::insights::Insight;
use crate::error::InputError;
use crate::scoring::RiskResult;
use crate::social::SocialFeatures;
use crate::statement::FinancialFeatures;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CreditDecision {
    pub approved: bool,
    pub requested_amount: f64,
    pub dscr_estimated: f64,
    pub max_safe_amount_by_sales: f64,
    pub recommended_limit: f64,
    pub insights: Vec<String>,
}

/// Intermediate figures every approval rule is checked against.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Affordability {
    dscr: f64,
    sales_cap: f64,
    sales_ratio: f64,
}

fn known(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn affordability(
    risk: &RiskResult,
    financial: &FinancialFeatures,
    requested: f64,
    config: &DecisionConfig,
    epsilon: f64,
) -> Affordability {
    let annual_debt_service = requested * config.debt_service_rate;
    let dscr = if annual_debt_service > 0.0 {
        (known(financial.cash_flow) + epsilon) / (annual_debt_service + epsilon)
    } else {
        0.0
    };

    let sales = known(financial.sales);
    let sales_ratio = config.max_sales_ratio.for_band(risk.band);
    let sales_cap = if sales > 0.0 { sales * sales_ratio } else { 0.0 };

    Affordability {
        dscr,
        sales_cap,
        sales_ratio,
    }
}

/// Failed checks and social warnings, in reporting order.
fn collect_insights(
    risk: &RiskResult,
    financial: &FinancialFeatures,
    social: &SocialFeatures,
    requested: f64,
    figures: &Affordability,
    config: &DecisionConfig,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if risk.score < config.min_score {
        insights.push(Insight::LowScore);
    }
    if requested > figures.sales_cap {
        insights.push(Insight::AmountOverSalesCap {
            max_share_of_sales: figures.sales_ratio,
        });
    }
    if figures.dscr < config.min_dscr {
        insights.push(Insight::LowDebtCoverage {
            min_dscr: config.min_dscr,
        });
    }
    if let Some(solvency) = financial.current_solvency {
        if solvency < config.min_solvency {
            insights.push(Insight::LowSolvency {
                min_solvency: config.min_solvency,
            });
        }
    }
    if social.sentiment < config.min_sentiment {
        insights.push(Insight::NegativeSentiment);
    }
    if social.engagement.unwrap_or(0.0) < config.min_engagement {
        insights.push(Insight::LowEngagement);
    }

    insights
}

pub fn decide(
    risk: &RiskResult,
    financial: &FinancialFeatures,
    social: &SocialFeatures,
    requested: f64,
    config: &DecisionConfig,
    epsilon: f64,
) -> Result<CreditDecision, InputError> {
    if !requested.is_finite() || requested < 0.0 {
        return Err(InputError::InvalidAmount(requested));
    }

    let figures = affordability(risk, financial, requested, config, epsilon);
    let solvency_ok = financial
        .current_solvency
        .map_or(true, |s| s >= config.min_solvency);
    let approved = risk.score >= config.min_score
        && requested <= figures.sales_cap
        && figures.dscr >= config.min_dscr
        && solvency_ok;

    let mut insights = collect_insights(risk, financial, social, requested, &figures, config);
    if insights.is_empty() {
        insights.push(if approved {
            Insight::SolidProfile
        } else {
            Insight::IncompleteData
        });
    }

    tracing::debug!(
        approved,
        requested,
        dscr = figures.dscr,
        sales_cap = figures.sales_cap,
        "credit decision"
    );

    Ok(CreditDecision {
        approved,
        requested_amount: requested,
        dscr_estimated: figures.dscr,
        max_safe_amount_by_sales: figures.sales_cap,
        recommended_limit: risk.credit_limit_recommended,
        insights: insights.iter().map(Insight::message).collect(),
    })
}
