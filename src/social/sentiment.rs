use crate::numeric::clamp;
use serde::{Deserialize, Serialize};

/// Keyword lexicon for the caption sentiment heuristic.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SentimentConfig {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    /// Net hits are divided by this before clamping to [-1, 1].
    pub divisor: f64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        let words = |list: &[&str]| list.iter().map(|w| w.to_string()).collect();
        Self {
            positive: words(&[
                "excelente",
                "bueno",
                "recomendado",
                "rápido",
                "cumplen",
                "confiable",
                "genial",
                "agradable",
            ]),
            negative: words(&[
                "malo",
                "pésimo",
                "tarde",
                "retraso",
                "caro",
                "deficiente",
                "queja",
                "reclamo",
                "incumplen",
            ]),
            divisor: 5.0,
        }
    }
}

/// Score one caption in [-1, 1]. Each keyword counts at most once.
pub fn caption_sentiment(text: &str, config: &SentimentConfig) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    let lowered = text.to_lowercase();
    let hits = |words: &[String]| {
        words
            .iter()
            .filter(|w| lowered.contains(&w.to_lowercase()))
            .count() as f64
    };
    let net = hits(&config.positive) - hits(&config.negative);
    clamp(net / config.divisor, -1.0, 1.0)
}
