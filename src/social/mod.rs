pub mod features;
pub mod record;
pub mod sentiment;

pub use features::{extract_social, SocialFeatures};
pub use record::{Comments, Post, Profile, SocialRecord};
pub use sentiment::{caption_sentiment, SentimentConfig};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SocialConfig {
    pub sentiment: SentimentConfig,
}

pub fn validate_social(config: &SocialConfig) -> Vec<String> {
    validate_sentiment(&config.sentiment)
}

fn validate_sentiment(config: &SentimentConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if !config.divisor.is_finite() || config.divisor <= 0.0 {
        errors.push("social.sentiment.divisor: must be a positive number".to_string());
    }
    for (list, words) in [("positive", &config.positive), ("negative", &config.negative)] {
        for (i, word) in words.iter().enumerate() {
            if word.trim().is_empty() {
                errors.push(format!("social.sentiment.{}[{}]: must not be blank", list, i));
            }
        }
    }

    errors
}
