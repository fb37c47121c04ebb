use super::capital::validate_capital;
use super::config::{PillarTier, ScoringConfig};
use super::model::Feature;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Every scored feature needs a reference distribution
    for feature in Feature::ALL {
        match config.reference.get(feature.as_str()) {
            None => errors.push(format!(
                "scoring.reference.{}: missing reference distribution",
                feature
            )),
            Some(dist) if !dist.mean.is_finite() || !dist.std.is_finite() => errors.push(
                format!("scoring.reference.{}: mean and std must be finite", feature),
            ),
            Some(_) => {}
        }
    }
    for name in config.reference.keys() {
        if Feature::from_name(name).is_none() {
            errors.push(format!("scoring.reference.{}: unknown feature", name));
        }
    }

    // Weights: one per feature, non-negative, positive total
    let mut total = 0.0;
    for feature in Feature::ALL {
        match config.weights.get(feature.as_str()) {
            None => errors.push(format!("scoring.weights.{}: missing weight", feature)),
            Some(w) if !w.is_finite() || *w < 0.0 => errors.push(format!(
                "scoring.weights.{}: must be a finite, non-negative number",
                feature
            )),
            Some(w) => total += w,
        }
    }
    for name in config.weights.keys() {
        if Feature::from_name(name).is_none() {
            errors.push(format!("scoring.weights.{}: unknown feature", name));
        }
    }
    if total <= 0.0 {
        errors.push("scoring.weights: must sum to a positive total".to_string());
    }

    // Pillar tiers
    for (name, tier) in [
        ("none", &config.pillars.none),
        ("partial", &config.pillars.partial),
        ("full", &config.pillars.full),
    ] {
        validate_tier(name, tier, &mut errors);
    }
    if config.pillars.none.cap > config.pillars.partial.cap
        || config.pillars.partial.cap > config.pillars.full.cap
    {
        errors.push(
            "scoring.pillars: caps must not decrease as financial pillars are added".to_string(),
        );
    }

    // Bands
    let bands = &config.bands;
    if !(0.0..=100.0).contains(&bands.medium_risk_min)
        || !(0.0..=100.0).contains(&bands.low_risk_min)
    {
        errors.push("scoring.bands: thresholds must be between 0 and 100".to_string());
    } else if bands.medium_risk_min > bands.low_risk_min {
        errors.push(
            "scoring.bands: medium_risk_min must not exceed low_risk_min".to_string(),
        );
    }

    // Transforms
    for (name, value) in [
        ("solvency_cap", config.solvency_cap),
        ("social_z_limit", config.social_z_limit),
        ("raw_limit", config.raw_limit),
    ] {
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!("scoring.{}: must be a positive number", name));
        }
    }
    if config.top_factors == 0 {
        errors.push("scoring.top_factors: must be at least 1".to_string());
    }

    errors.extend(validate_capital(&config.capital));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_tier(name: &str, tier: &PillarTier, errors: &mut Vec<String>) {
    if !tier.social_multiplier.is_finite() || tier.social_multiplier < 0.0 {
        errors.push(format!(
            "scoring.pillars.{}.social_multiplier: must be a finite, non-negative number",
            name
        ));
    }
    if !(0.0..=100.0).contains(&tier.cap) {
        errors.push(format!(
            "scoring.pillars.{}.cap: must be between 0 and 100",
            name
        ));
    }
}
