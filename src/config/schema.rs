use crate::decision::DecisionConfig;
use crate::scoring::ScoringConfig;
use crate::social::SocialConfig;
use crate::statement::StatementConfig;
use serde::{Deserialize, Serialize};

/// Everything the engine reads at startup. Every section is optional in
/// YAML; omitted sections fall back to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub statement: StatementConfig,
    pub social: SocialConfig,
    pub scoring: ScoringConfig,
    pub decision: DecisionConfig,
}
