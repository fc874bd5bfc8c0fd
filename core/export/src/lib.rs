//! FILENAME: core/export/src/lib.rs
//! Datatable Export Module
//!
//! Renders rows through their column definitions and writes the result as
//! CSV or XLSX. Cells are rendered with `Column::render_for_export`, so
//! booleans come out as Yes/No and markup never reaches a file.

mod csv_writer;
mod error;
mod xlsx_writer;

pub use csv_writer::{save_csv, to_csv_bytes, write_csv};
pub use error::ExportError;
pub use xlsx_writer::{save_xlsx, to_xlsx_bytes};

use columns::{CellValue, Column, ColumnBuilder, ColumnType, RenderContext, Rendered, TextAlign};
use serde::Serialize;
use std::collections::HashMap;

/// Worksheet name used when the caller does not pick one.
pub const DEFAULT_SHEET_NAME: &str = "Datatable";

// ============================================================================
// EXPORT CELLS
// ============================================================================

/// One rendered cell, ready for a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportCell {
    Empty,
    Integer(i64),
    Number(f64),
    Text(String),
}

impl ExportCell {
    /// Text written to CSV.
    pub fn to_export_string(&self) -> String {
        match self {
            ExportCell::Empty => String::new(),
            ExportCell::Integer(i) => i.to_string(),
            ExportCell::Number(n) => columns::format_general(*n),
            ExportCell::Text(s) => s.clone(),
        }
    }
}

impl From<Rendered> for ExportCell {
    fn from(rendered: Rendered) -> Self {
        match rendered {
            Rendered::Empty => ExportCell::Empty,
            Rendered::Integer(i) => ExportCell::Integer(i),
            Rendered::Number(n) => ExportCell::Number(n),
            Rendered::Text(s) => ExportCell::Text(s),
            Rendered::Html(html) => ExportCell::Text(columns::value::strip_tags(&html)),
        }
    }
}

// ============================================================================
// EXPORT SHEET
// ============================================================================

/// Header metadata of one exported column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportColumn {
    pub name: String,
    pub label: String,
    pub column_type: ColumnType,
    pub header_align: TextAlign,
    pub content_align: TextAlign,
}

impl ExportColumn {
    fn from_column(column: &Column) -> Self {
        let base = column.base();
        ExportColumn {
            name: base.name.clone(),
            label: base.label.clone(),
            column_type: column.column_type(),
            header_align: base.header_align,
            content_align: base.content_align,
        }
    }
}

/// A fully rendered table. Hidden columns are already dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSheet {
    pub name: String,
    pub columns: Vec<ExportColumn>,
    pub rows: Vec<Vec<ExportCell>>,
}

impl ExportSheet {
    /// Render positional rows. Every row must hold one value per column,
    /// hidden columns included.
    pub fn build(
        columns: &[Column],
        rows: &[Vec<CellValue>],
        ctx: &RenderContext<'_>,
    ) -> Result<Self, ExportError> {
        let mut rendered_rows = Vec::with_capacity(rows.len());

        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(ExportError::RowWidth {
                    row: row_idx,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            rendered_rows.push(render_row(columns, row.iter(), row_idx, ctx)?);
        }

        Ok(Self::assemble(columns, rendered_rows))
    }

    /// Render rows keyed by column name. Missing keys render as empty values.
    pub fn from_records(
        columns: &[Column],
        records: &[HashMap<String, CellValue>],
        ctx: &RenderContext<'_>,
    ) -> Result<Self, ExportError> {
        let empty = CellValue::Empty;
        let mut rendered_rows = Vec::with_capacity(records.len());

        for (row_idx, record) in records.iter().enumerate() {
            let values = columns
                .iter()
                .map(|c| record.get(c.name()).unwrap_or(&empty));
            rendered_rows.push(render_row(columns, values, row_idx, ctx)?);
        }

        Ok(Self::assemble(columns, rendered_rows))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Every row must match the header width. `build` guarantees this, but
    /// `rows` is public and writers check again before indexing.
    pub fn check_row_widths(&self) -> Result<(), ExportError> {
        let expected = self.columns.len();
        match self.rows.iter().position(|row| row.len() != expected) {
            Some(row) => Err(ExportError::RowWidth {
                row,
                expected,
                found: self.rows[row].len(),
            }),
            None => Ok(()),
        }
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    fn assemble(columns: &[Column], rows: Vec<Vec<ExportCell>>) -> Self {
        let columns: Vec<ExportColumn> = columns
            .iter()
            .filter(|c| !c.is_hidden())
            .map(ExportColumn::from_column)
            .collect();

        log::debug!(
            "rendered export sheet with {} columns and {} rows",
            columns.len(),
            rows.len()
        );

        ExportSheet {
            name: DEFAULT_SHEET_NAME.to_string(),
            columns,
            rows,
        }
    }
}

fn render_row<'v>(
    columns: &[Column],
    values: impl Iterator<Item = &'v CellValue>,
    row_idx: usize,
    ctx: &RenderContext<'_>,
) -> Result<Vec<ExportCell>, ExportError> {
    let mut cells = Vec::with_capacity(columns.len());

    for (column, value) in columns.iter().zip(values) {
        if column.is_hidden() {
            continue;
        }
        let rendered = column
            .render_for_export(value, ctx)
            .map_err(|source| ExportError::Column {
                row: row_idx,
                column: column.name().to_string(),
                source,
            })?;
        cells.push(ExportCell::from(rendered));
    }

    Ok(cells)
}
