//! FILENAME: core/columns/src/column/number.rs
//! PURPOSE: Number column with round and separator-format modes.
//! CONTEXT: `round` and `format` each replace the column's mode; whichever
//! is called last wins. Until either is called the value passes through.

use super::text::passthrough;
use super::{ColumnBase, ColumnBuilder};
use crate::error::ColumnError;
use crate::number_format::{
    format_integer_with_separators, format_with_separators, round_half_away_from_zero,
};
use crate::value::{CellValue, Rendered};

/// How a number column turns a value into display output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberMode {
    /// No formatting configured.
    Raw,
    /// Round to the column's `round_precision`.
    Round,
    /// Fixed decimals with custom separators.
    Format {
        decimals: u32,
        decimal_separator: String,
        thousands_separator: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberColumn {
    base: ColumnBase,
    round_precision: i32,
    mode: NumberMode,
}

impl NumberColumn {
    pub fn new(name: impl Into<String>) -> Self {
        NumberColumn {
            base: ColumnBase::new(name).right_aligned(),
            round_precision: 0,
            mode: NumberMode::Raw,
        }
    }

    /// Round values to `precision` decimal digits (negative rounds to tens,
    /// hundreds, ...). Ties go away from zero.
    pub fn round(mut self, precision: i32) -> Self {
        self.round_precision = precision;
        self.mode = NumberMode::Round;
        log::debug!(
            "number column '{}' rounds to {} digits",
            self.base.name,
            precision
        );
        self
    }

    /// Render values with `decimals` fractional digits and the given separators.
    pub fn format(
        mut self,
        decimals: u32,
        decimal_separator: &str,
        thousands_separator: &str,
    ) -> Self {
        self.mode = NumberMode::Format {
            decimals,
            decimal_separator: decimal_separator.to_string(),
            thousands_separator: thousands_separator.to_string(),
        };
        log::debug!(
            "number column '{}' formats with {} decimals ({:?} / {:?})",
            self.base.name,
            decimals,
            decimal_separator,
            thousands_separator
        );
        self
    }

    /// `format(0, ".", ",")`
    pub fn format_default(self) -> Self {
        self.format(0, ".", ",")
    }

    pub fn round_precision(&self) -> i32 {
        self.round_precision
    }

    pub fn mode(&self) -> &NumberMode {
        &self.mode
    }

    /// Empty values render as nothing in every mode. In round and format
    /// mode the value must be an integer, a float or numeric text.
    pub fn render(&self, value: &CellValue) -> Result<Rendered, ColumnError> {
        if value.is_empty() {
            return Ok(Rendered::Empty);
        }

        match &self.mode {
            NumberMode::Raw => Ok(passthrough(value)),
            // Integers are already rounded to any non-negative precision
            NumberMode::Round => {
                if let CellValue::Integer(i) = value {
                    if self.round_precision >= 0 {
                        return Ok(Rendered::Integer(*i));
                    }
                }
                let number = self.numeric(value)?;
                Ok(Rendered::Number(round_half_away_from_zero(
                    number,
                    self.round_precision,
                )))
            }
            NumberMode::Format {
                decimals,
                decimal_separator,
                thousands_separator,
            } => {
                if let CellValue::Integer(i) = value {
                    return Ok(Rendered::Text(format_integer_with_separators(
                        *i,
                        *decimals,
                        decimal_separator,
                        thousands_separator,
                    )));
                }
                let number = self.numeric(value)?;
                Ok(Rendered::Text(format_with_separators(
                    number,
                    *decimals,
                    decimal_separator,
                    thousands_separator,
                )))
            }
        }
    }

    fn numeric(&self, value: &CellValue) -> Result<f64, ColumnError> {
        value
            .as_number()
            .filter(|n| n.is_finite())
            .ok_or_else(|| ColumnError::NotNumeric {
                column: self.base.name.clone(),
                value: value.describe(),
            })
    }
}

impl ColumnBuilder for NumberColumn {
    fn base(&self) -> &ColumnBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ColumnBase {
        &mut self.base
    }
}
