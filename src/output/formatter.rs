use std::io::IsTerminal;
use owo_colors::OwoColorize;

use crate::decision::CreditDecision;
use crate::pipeline::Assessment;
use crate::scoring::{RiskBand, RiskResult};
use crate::social::SocialFeatures;
use crate::statement::FinancialFeatures;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with one decimal.
/// If capped is true, appends asterisk to indicate the pillar cap applied
pub fn format_score(score: f64, capped: bool) -> String {
    let formatted = format!("{:.1}", score);
    if capped {
        format!("{}*", formatted)
    } else {
        formatted
    }
}

/// Format a money amount in compact notation (1.5k, 2.3M, 847)
pub fn format_amount(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();
    let formatted = if abs >= 1_000_000.0 {
        format!("{:.1}M", abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", abs / 1_000.0)
    } else {
        format!("{:.0}", abs)
    };

    // Trim trailing .0 (e.g., "1.0k" -> "1k")
    let trimmed = formatted.replace(".0M", "M").replace(".0k", "k");
    format!("{}{}", sign, trimmed)
}

fn format_optional(value: Option<f64>, render: impl Fn(f64) -> String) -> String {
    value.map(render).unwrap_or_else(|| "n/a".to_string())
}

fn format_ratio(value: f64) -> String {
    format!("{:.2}", value)
}

fn band_label(band: RiskBand, use_colors: bool) -> String {
    let label = format!("{} risk", band);
    if !use_colors {
        return label;
    }
    match band {
        RiskBand::Low => label.green().bold().to_string(),
        RiskBand::Medium => label.yellow().bold().to_string(),
        RiskBand::High => label.red().bold().to_string(),
    }
}

/// Format the extracted features, one per line. Unknown values show as "n/a".
pub fn format_features(financial: &FinancialFeatures, social: &SocialFeatures) -> String {
    [
        format!("  Sales: {}", format_optional(financial.sales, format_amount)),
        format!("  Cash flow: {}", format_optional(financial.cash_flow, format_amount)),
        format!("  Assets: {}", format_optional(financial.assets, format_amount)),
        format!("  Liabilities: {}", format_optional(financial.liabilities, format_amount)),
        format!("  Solvency: {}", format_optional(financial.current_solvency, format_ratio)),
        format!("  Asset turnover: {}", format_optional(financial.asset_turnover, format_ratio)),
        format!(
            "  Cash flow / debt: {}",
            format_optional(financial.cashflow_to_debt, format_ratio)
        ),
        format!("  Followers: {}", format_optional(social.followers, format_amount)),
        format!(
            "  Engagement: {}",
            format_optional(social.engagement, |e| format!("{:.2}%", e * 100.0))
        ),
        format!("  Sentiment: {:+.2}", social.sentiment),
    ]
    .join("\n")
}

/// Format a risk result as a headline plus details
pub fn format_risk(risk: &RiskResult, use_colors: bool) -> String {
    let score = format_score(risk.score, risk.breakdown.capped);
    let headline = if use_colors {
        format!("Score {} ({})", score.bold(), band_label(risk.band, true))
    } else {
        format!("Score {} ({})", score, band_label(risk.band, false))
    };

    let mut lines = vec![
        headline,
        format!(
            "  Financial pillars: {}/2 (cap {:.0})",
            risk.breakdown.pillars, risk.breakdown.score_cap
        ),
        format!("  Relative capital: {:.2}", risk.capital_relative),
        format!(
            "  Recommended limit: {}",
            format_amount(risk.credit_limit_recommended)
        ),
    ];
    if !risk.top_factors.is_empty() {
        lines.push(format!("  Top factors: {}", risk.top_factors.join(", ")));
    }
    lines.join("\n")
}

/// Format a credit decision with its insights
pub fn format_decision(decision: &CreditDecision, use_colors: bool) -> String {
    let verdict = match (decision.approved, use_colors) {
        (true, true) => "APPROVED".green().bold().to_string(),
        (false, true) => "DENIED".red().bold().to_string(),
        (true, false) => "APPROVED".to_string(),
        (false, false) => "DENIED".to_string(),
    };

    let mut lines = vec![
        format!(
            "{} for {}",
            verdict,
            format_amount(decision.requested_amount)
        ),
        format!("  DSCR: {:.2}", decision.dscr_estimated),
        format!(
            "  Max safe amount by sales: {}",
            format_amount(decision.max_safe_amount_by_sales)
        ),
        format!(
            "  Recommended limit: {}",
            format_amount(decision.recommended_limit)
        ),
    ];
    for insight in &decision.insights {
        if use_colors {
            lines.push(format!("  {} {}", "-".dimmed(), insight));
        } else {
            lines.push(format!("  - {}", insight));
        }
    }
    lines.join("\n")
}

/// Format a full assessment: features, risk, then the decision if any
pub fn format_assessment(assessment: &Assessment, use_colors: bool) -> String {
    let mut sections = vec![
        format_risk(&assessment.risk, use_colors),
        format!(
            "Features\n{}",
            format_features(&assessment.financial, &assessment.social)
        ),
    ];
    if let Some(decision) = &assessment.decision {
        sections.push(format_decision(decision, use_colors));
    }
    sections.join("\n\n")
}
