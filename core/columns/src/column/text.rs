//! FILENAME: core/columns/src/column/text.rs
//! PURPOSE: The plain column: values are shown the way they were loaded.

use super::{ColumnBase, ColumnBuilder};
use crate::value::{CellValue, Rendered};

#[derive(Debug, Clone, PartialEq)]
pub struct TextColumn {
    base: ColumnBase,
}

impl TextColumn {
    pub fn new(name: impl Into<String>) -> Self {
        TextColumn {
            base: ColumnBase::new(name),
        }
    }

    pub fn render(&self, value: &CellValue) -> Rendered {
        passthrough(value)
    }
}

impl ColumnBuilder for TextColumn {
    fn base(&self) -> &ColumnBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ColumnBase {
        &mut self.base
    }
}

/// Unformatted rendering shared by columns that have not been configured.
/// Booleans print as `1` / empty, matching how the host template layer
/// echoes them.
pub(crate) fn passthrough(value: &CellValue) -> Rendered {
    match value {
        CellValue::Empty => Rendered::Empty,
        CellValue::Boolean(true) => Rendered::Text("1".to_string()),
        CellValue::Boolean(false) => Rendered::Text(String::new()),
        CellValue::Integer(i) => Rendered::Integer(*i),
        CellValue::Number(n) => Rendered::Number(*n),
        CellValue::Text(s) => Rendered::Text(s.clone()),
        CellValue::DateTime(dt) => Rendered::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
    }
}
