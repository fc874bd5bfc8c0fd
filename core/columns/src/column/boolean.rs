//! FILENAME: core/columns/src/column/boolean.rs
//! PURPOSE: Boolean column: a check/cross view on screen, Yes/No in exports.

use serde_json::json;

use super::{ColumnBase, ColumnBuilder};
use crate::error::ColumnError;
use crate::value::{CellValue, Rendered};
use crate::view::{ViewRenderer, BOOLEAN_VIEW};

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanColumn {
    base: ColumnBase,
}

impl BooleanColumn {
    pub fn new(name: impl Into<String>) -> Self {
        BooleanColumn {
            base: ColumnBase::new(name),
        }
    }

    /// Render the boolean view for the value's truthiness.
    pub fn render(
        &self,
        value: &CellValue,
        views: &dyn ViewRenderer,
    ) -> Result<Rendered, ColumnError> {
        let html = views.render(BOOLEAN_VIEW, &json!({ "value": value.is_truthy() }))?;
        Ok(Rendered::Html(html))
    }

    /// Export text: `"Yes"` for truthy values, `"No"` otherwise.
    pub fn export(&self, value: &CellValue) -> &'static str {
        if value.is_truthy() {
            "Yes"
        } else {
            "No"
        }
    }
}

impl ColumnBuilder for BooleanColumn {
    fn base(&self) -> &ColumnBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ColumnBase {
        &mut self.base
    }
}
