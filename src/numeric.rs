use serde::{Deserialize, Serialize};

/// Default stabilizer for ratio division.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Cell contents that mean "no value" rather than "zero".
const MISSING_MARKERS: &[&str] = &["", "-", "—", "n/a", "na", "null", "none", "nan"];

/// A numeric cell as it arrives from an extraction collaborator: either an
/// already-typed number or the raw text of a table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

/// Outcome of coercing a cell to a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parsed {
    Missing,
    Number(f64),
    Invalid,
}

impl Cell {
    pub fn parse(&self) -> Parsed {
        match self {
            Cell::Number(n) => Parsed::Number(*n),
            Cell::Text(text) => parse_amount(text),
        }
    }

    /// Raw representation used in error messages.
    pub fn raw(&self) -> String {
        match self {
            Cell::Number(n) => n.to_string(),
            Cell::Text(text) => text.clone(),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// Parse an amount the way it is printed in statements: thousands
/// separators, currency symbols and accounting-style `(1,234)` negatives.
pub fn parse_amount(raw: &str) -> Parsed {
    let trimmed = raw.trim();
    if MISSING_MARKERS
        .iter()
        .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    {
        return Parsed::Missing;
    }

    let (negative, body) = match trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };

    let cleaned: String = body
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '€' | '£') && !c.is_whitespace())
        .collect();

    match cleaned.parse::<f64>() {
        Ok(n) if negative => Parsed::Number(-n),
        Ok(n) => Parsed::Number(n),
        Err(_) => Parsed::Invalid,
    }
}

/// `(a + ε) / (b + ε)` when both operands are known and `b` is non-zero.
pub fn safe_div(numerator: Option<f64>, denominator: Option<f64>, epsilon: f64) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 && d + epsilon != 0.0 => {
            Some((n + epsilon) / (d + epsilon))
        }
        _ => None,
    }
}

pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}
