//! End-to-end flow: statement rows and a social record in, features, risk
//! and an optional credit decision out.

use crate::config::{validate_config, Config};
use crate::decision::{self, CreditDecision, DecisionConfig};
use crate::error::{ConfigError, InputError};
use crate::scoring::{calculate_score, RiskResult, ScoringModel};
use crate::social::{extract_social, SocialConfig, SocialFeatures, SocialRecord};
use crate::statement::{parse_bundle, parse_statement, RawRow, StatementBundle, StatementConfig};
use crate::statement::FinancialFeatures;
use serde::{Deserialize, Serialize};

/// Everything produced for one applicant.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Assessment {
    pub financial: FinancialFeatures,
    pub social: SocialFeatures,
    pub risk: RiskResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<CreditDecision>,
}

/// Validated, immutable configuration shared by every request.
#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    model: ScoringModel,
}

impl Engine {
    /// Validate every section and build the scoring model. All problems are
    /// reported together.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Invalid)?;
        let model = ScoringModel::new(&config.scoring, config.statement.epsilon)?;
        Ok(Self { config, model })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn extract_features(
        &self,
        rows: &[RawRow],
        record: &SocialRecord,
    ) -> Result<(FinancialFeatures, SocialFeatures), InputError> {
        extract_features(rows, record, &self.config.statement, &self.config.social)
    }

    pub fn extract_statement_features(
        &self,
        bundle: &StatementBundle,
        record: &SocialRecord,
    ) -> Result<(FinancialFeatures, SocialFeatures), InputError> {
        extract_statement_features(bundle, record, &self.config.statement, &self.config.social)
    }

    pub fn score(&self, financial: &FinancialFeatures, social: &SocialFeatures) -> RiskResult {
        calculate_score(financial, social, &self.model)
    }

    pub fn decide(
        &self,
        risk: &RiskResult,
        financial: &FinancialFeatures,
        social: &SocialFeatures,
        requested: f64,
    ) -> Result<CreditDecision, InputError> {
        decide(
            risk,
            financial,
            social,
            requested,
            &self.config.decision,
            self.model.epsilon,
        )
    }

    /// Run the whole flow. The decision is only made when an amount is given.
    pub fn analyze(
        &self,
        bundle: &StatementBundle,
        record: &SocialRecord,
        requested: Option<f64>,
    ) -> Result<Assessment, InputError> {
        let (financial, social) = self.extract_statement_features(bundle, record)?;
        let risk = self.score(&financial, &social);
        let decision = requested
            .map(|amount| self.decide(&risk, &financial, &social, amount))
            .transpose()?;

        Ok(Assessment {
            financial,
            social,
            risk,
            decision,
        })
    }
}

/// Features from a single table of statement rows.
pub fn extract_features(
    rows: &[RawRow],
    record: &SocialRecord,
    statement: &StatementConfig,
    social: &SocialConfig,
) -> Result<(FinancialFeatures, SocialFeatures), InputError> {
    let financial = parse_statement(rows, statement)?;
    finish_extraction(financial, record, social)
}

/// Features from a full filing, letting anchor lines override sums.
pub fn extract_statement_features(
    bundle: &StatementBundle,
    record: &SocialRecord,
    statement: &StatementConfig,
    social: &SocialConfig,
) -> Result<(FinancialFeatures, SocialFeatures), InputError> {
    let financial = parse_bundle(bundle, statement)?;
    finish_extraction(financial, record, social)
}

fn finish_extraction(
    financial: FinancialFeatures,
    record: &SocialRecord,
    social: &SocialConfig,
) -> Result<(FinancialFeatures, SocialFeatures), InputError> {
    if financial.is_empty() {
        tracing::warn!("no financial concept recognised in the statement rows");
    }
    let social = extract_social(record, &social.sentiment)?;
    tracing::debug!(
        posts = record.posts.len(),
        followers = ?social.followers,
        "extracted social features"
    );
    Ok((financial, social))
}

/// Score with an explicit model.
pub fn score(
    financial: &FinancialFeatures,
    social: &SocialFeatures,
    model: &ScoringModel,
) -> RiskResult {
    calculate_score(financial, social, model)
}

/// Decide with explicit thresholds.
pub fn decide(
    risk: &RiskResult,
    financial: &FinancialFeatures,
    social: &SocialFeatures,
    requested: f64,
    config: &DecisionConfig,
    epsilon: f64,
) -> Result<CreditDecision, InputError> {
    decision::decide(risk, financial, social, requested, config, epsilon)
}
