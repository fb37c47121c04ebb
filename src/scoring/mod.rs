pub mod capital;
pub mod config;
pub mod engine;
pub mod model;
pub mod policy;
pub mod validation;

pub use capital::{estimate_capital, CapitalConfig};
pub use config::*;
pub use engine::{calculate_score, FactorContribution, RiskBand, RiskResult, ScoreBreakdown};
pub use model::{Feature, ScoringModel};
pub use policy::{count_pillars, pillar_policy, PillarAdjustment};
pub use validation::validate_scoring;
