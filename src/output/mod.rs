pub mod formatter;

pub use formatter::{
    format_amount, format_assessment, format_decision, format_features, format_risk,
    format_score, should_use_colors,
};
