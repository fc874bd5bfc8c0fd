//! FILENAME: core/columns/src/column/date.rs
//! PURPOSE: Date and time columns.
//! CONTEXT: Both parse the raw value and render it with their own pattern,
//! falling back to the configured default (`default_date_format` or
//! `default_time_format`) when none was set. Falsy values render as nothing.

use super::{ColumnBase, ColumnBuilder};
use crate::config::DatatablesConfig;
use crate::date_format::{parse_datetime, DatePattern};
use crate::error::ColumnError;
use crate::value::CellValue;

#[derive(Debug, Clone, PartialEq)]
pub struct DateColumn {
    base: ColumnBase,
    pattern: Option<DatePattern>,
}

impl DateColumn {
    pub fn new(name: impl Into<String>) -> Self {
        DateColumn {
            base: ColumnBase::new(name),
            pattern: None,
        }
    }

    /// Set the display pattern; `None` returns to the configured default.
    pub fn format<'f>(mut self, pattern: impl Into<Option<&'f str>>) -> Self {
        self.pattern = pattern.into().map(DatePattern::parse);
        log::debug!(
            "date column '{}' uses format {:?}",
            self.base.name,
            self.pattern.as_ref().map(DatePattern::source)
        );
        self
    }

    pub fn default_format(self) -> Self {
        self.format(None)
    }

    /// The explicit pattern, if one was set.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(DatePattern::source)
    }

    pub fn render(
        &self,
        value: &CellValue,
        config: &DatatablesConfig,
    ) -> Result<Option<String>, ColumnError> {
        render_temporal(
            value,
            self.pattern.as_ref(),
            config.default_date_format.as_deref(),
            "default_date_format",
        )
    }
}

impl ColumnBuilder for DateColumn {
    fn base(&self) -> &ColumnBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ColumnBase {
        &mut self.base
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeColumn {
    base: ColumnBase,
    pattern: Option<DatePattern>,
}

impl TimeColumn {
    pub fn new(name: impl Into<String>) -> Self {
        TimeColumn {
            base: ColumnBase::new(name),
            pattern: None,
        }
    }

    /// Set the display pattern; `None` returns to the configured default.
    pub fn format<'f>(mut self, pattern: impl Into<Option<&'f str>>) -> Self {
        self.pattern = pattern.into().map(DatePattern::parse);
        log::debug!(
            "time column '{}' uses format {:?}",
            self.base.name,
            self.pattern.as_ref().map(DatePattern::source)
        );
        self
    }

    pub fn default_format(self) -> Self {
        self.format(None)
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(DatePattern::source)
    }

    pub fn render(
        &self,
        value: &CellValue,
        config: &DatatablesConfig,
    ) -> Result<Option<String>, ColumnError> {
        render_temporal(
            value,
            self.pattern.as_ref(),
            config.default_time_format.as_deref(),
            "default_time_format",
        )
    }
}

impl ColumnBuilder for TimeColumn {
    fn base(&self) -> &ColumnBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ColumnBase {
        &mut self.base
    }
}

fn render_temporal(
    value: &CellValue,
    pattern: Option<&DatePattern>,
    fallback: Option<&str>,
    fallback_key: &'static str,
) -> Result<Option<String>, ColumnError> {
    if !value.is_truthy() {
        return Ok(None);
    }

    let dt = parse_datetime(value).ok_or_else(|| {
        log::warn!("could not parse {} as a date", value.describe());
        ColumnError::Parse {
            value: value.describe(),
        }
    })?;

    let text = match (pattern, fallback) {
        (Some(pattern), _) => pattern.format(&dt),
        (None, Some(fallback)) => DatePattern::parse(fallback).format(&dt),
        (None, None) => return Err(ColumnError::ConfigMissing { key: fallback_key }),
    };

    Ok(Some(text))
}
