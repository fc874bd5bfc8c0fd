//! FILENAME: core/columns/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColumnError {
    #[error("Could not parse {value} as a date")]
    Parse { value: String },

    #[error("No format given and no {key} configured")]
    ConfigMissing { key: &'static str },

    #[error("Column '{column}' expects a numeric value, got {value}")]
    NotNumeric { column: String, value: String },

    #[error("View render error: {0}")]
    View(String),
}

impl From<minijinja::Error> for ColumnError {
    fn from(err: minijinja::Error) -> Self {
        ColumnError::View(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}
