use thiserror::Error;

/// Raised when a raw record violates the basic shape contract.
///
/// Missing data is never reported here: absent fields become `None` and
/// lower scoring confidence instead.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("row {row} ({label}): value {value:?} is not a number")]
    NonNumericValue {
        row: usize,
        label: String,
        value: String,
    },

    #[error("row {row} ({label}): value is not a finite number")]
    NonFiniteValue { row: usize, label: String },

    #[error("social record: {field} {value:?} is not a number")]
    NonNumericSocialField { field: String, value: String },

    #[error("requested amount {0} must be a finite, non-negative number")]
    InvalidAmount(f64),

    #[error("failed to read statement rows: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse social record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raised once at startup when the configuration cannot serve requests.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration:\n  - {}", .0.join("\n  - "))]
    Invalid(Vec<String>),
}

impl ConfigError {
    pub fn problems(&self) -> &[String] {
        match self {
            ConfigError::Invalid(problems) => problems,
        }
    }
}
