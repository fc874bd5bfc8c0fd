//! FILENAME: core/columns/src/config.rs
//! PURPOSE: Datatable configuration consumed by the column formatters.
//! CONTEXT: Passed explicitly through `RenderContext` instead of being looked
//! up from process-wide state, so every formatter stays testable in isolation.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

pub const DEFAULT_DATE_FORMAT: &str = "d/m/Y";
pub const DEFAULT_TIME_FORMAT: &str = "H:i";

/// Settings shared by every table.
/// Missing keys in a config file fall back to the defaults; an explicit
/// `null` clears the default so columns without a format fail loudly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatatablesConfig {
    /// Pattern used by date columns that have no format of their own.
    pub default_date_format: Option<String>,
    /// Pattern used by time columns that have no format of their own.
    pub default_time_format: Option<String>,
}

impl Default for DatatablesConfig {
    fn default() -> Self {
        DatatablesConfig {
            default_date_format: Some(DEFAULT_DATE_FORMAT.to_string()),
            default_time_format: Some(DEFAULT_TIME_FORMAT.to_string()),
        }
    }
}

impl DatatablesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration with no defaults at all.
    pub fn empty() -> Self {
        DatatablesConfig {
            default_date_format: None,
            default_time_format: None,
        }
    }

    pub fn with_default_date_format(mut self, format: impl Into<String>) -> Self {
        self.default_date_format = Some(format.into());
        self
    }

    pub fn with_default_time_format(mut self, format: impl Into<String>) -> Self {
        self.default_time_format = Some(format.into());
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        log::debug!("loaded datatables config from {:?}", path);
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DatatablesConfig::default();
        assert_eq!(config.default_date_format.as_deref(), Some("d/m/Y"));
        assert_eq!(config.default_time_format.as_deref(), Some("H:i"));
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config =
            DatatablesConfig::from_json_str(r#"{ "default_date_format": "Y-m-d" }"#).unwrap();
        assert_eq!(config.default_date_format.as_deref(), Some("Y-m-d"));
        assert_eq!(config.default_time_format.as_deref(), Some("H:i"));
    }

    #[test]
    fn test_null_clears_default() {
        let config =
            DatatablesConfig::from_json_str(r#"{ "default_date_format": null }"#).unwrap();
        assert_eq!(config.default_date_format, None);
    }

    #[test]
    fn test_invalid_json() {
        let result = DatatablesConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "default_time_format": "g:i A" }}"#).unwrap();

        let config = DatatablesConfig::from_path(file.path()).unwrap();
        assert_eq!(config.default_time_format.as_deref(), Some("g:i A"));
    }

    #[test]
    fn test_missing_file() {
        let result = DatatablesConfig::from_path(Path::new("/nonexistent/datatables.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = DatatablesConfig::new().with_default_date_format("Y/m/d");
        let restored = DatatablesConfig::from_json_str(&config.to_json()).unwrap();
        assert_eq!(restored, config);
    }
}
