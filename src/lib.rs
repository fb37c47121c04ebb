pub mod config;
pub mod decision;
pub mod error;
pub mod numeric;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod social;
pub mod statement;

pub use error::{ConfigError, InputError};
pub use pipeline::{Assessment, Engine};
