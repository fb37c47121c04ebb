mod config;
mod engine;
mod insights;

pub use config::{validate_decision, BandRatios, DecisionConfig};
pub use engine::{decide, CreditDecision};
pub use insights::Insight;
