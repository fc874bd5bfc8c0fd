//! FILENAME: core/columns/src/column/mod.rs
//! PURPOSE: The shared column base and the closed set of column variants.
//! CONTEXT: A table definition is a list of `Column`s. Each variant decides
//! how a raw `CellValue` is shown on screen (`render`) and how it is written
//! to an export (`render_for_export`). Variants are configured through
//! consuming builder methods and are read-only afterwards.

mod boolean;
mod date;
mod number;
mod text;

pub use boolean::BooleanColumn;
pub use date::{DateColumn, TimeColumn};
pub use number::{NumberColumn, NumberMode};
pub use text::TextColumn;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::DatatablesConfig;
use crate::error::ColumnError;
use crate::value::{CellValue, Rendered};
use crate::view::ViewRenderer;

// ============================================================================
// COLUMN BASE
// ============================================================================

/// Horizontal alignment of header or cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Type tag the host renderer uses to pick filters and cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Boolean,
    Date,
    Time,
    Number,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::Time => "time",
            ColumnType::Number => "number",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata shared by every column variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnBase {
    pub name: String,
    pub label: String,
    pub header_align: TextAlign,
    pub content_align: TextAlign,
    /// Hidden columns are neither displayed nor exported.
    pub hidden: bool,
}

impl ColumnBase {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        ColumnBase {
            label: name.clone(),
            name,
            header_align: TextAlign::Left,
            content_align: TextAlign::Left,
            hidden: false,
        }
    }

    fn right_aligned(mut self) -> Self {
        self.header_align = TextAlign::Right;
        self.content_align = TextAlign::Right;
        self
    }
}

/// Accessors and builder methods every column variant gets from its base.
pub trait ColumnBuilder: Sized {
    fn base(&self) -> &ColumnBase;
    fn base_mut(&mut self) -> &mut ColumnBase;

    fn name(&self) -> &str {
        &self.base().name
    }

    fn label(&self) -> &str {
        &self.base().label
    }

    fn is_hidden(&self) -> bool {
        self.base().hidden
    }

    fn with_label(mut self, label: impl Into<String>) -> Self {
        self.base_mut().label = label.into();
        self
    }

    fn with_header_align(mut self, align: TextAlign) -> Self {
        self.base_mut().header_align = align;
        self
    }

    fn with_content_align(mut self, align: TextAlign) -> Self {
        self.base_mut().content_align = align;
        self
    }

    /// Align header and content together.
    fn with_alignment(self, align: TextAlign) -> Self {
        self.with_header_align(align).with_content_align(align)
    }

    fn hide(mut self) -> Self {
        self.base_mut().hidden = true;
        self
    }
}

// ============================================================================
// RENDER CONTEXT
// ============================================================================

/// External collaborators a column needs while rendering.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a DatatablesConfig,
    pub views: &'a dyn ViewRenderer,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a DatatablesConfig, views: &'a dyn ViewRenderer) -> Self {
        RenderContext { config, views }
    }
}

impl fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// COLUMN
// ============================================================================

/// One configured column of a table definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Text(TextColumn),
    Boolean(BooleanColumn),
    Date(DateColumn),
    Time(TimeColumn),
    Number(NumberColumn),
}

impl Column {
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Text(_) => ColumnType::String,
            Column::Boolean(_) => ColumnType::Boolean,
            Column::Date(_) => ColumnType::Date,
            Column::Time(_) => ColumnType::Time,
            Column::Number(_) => ColumnType::Number,
        }
    }

    /// Value shown on screen for one cell.
    pub fn render(&self, value: &CellValue, ctx: &RenderContext<'_>) -> Result<Rendered, ColumnError> {
        match self {
            Column::Text(col) => Ok(col.render(value)),
            Column::Boolean(col) => col.render(value, ctx.views),
            Column::Date(col) => Ok(col.render(value, ctx.config)?.map_or(Rendered::Empty, Rendered::Text)),
            Column::Time(col) => Ok(col.render(value, ctx.config)?.map_or(Rendered::Empty, Rendered::Text)),
            Column::Number(col) => col.render(value),
        }
    }

    /// Value written to CSV/XLSX exports for one cell. Markup never reaches an export.
    pub fn render_for_export(
        &self,
        value: &CellValue,
        ctx: &RenderContext<'_>,
    ) -> Result<Rendered, ColumnError> {
        match self {
            Column::Boolean(col) => Ok(Rendered::Text(col.export(value).to_string())),
            other => match other.render(value, ctx)? {
                Rendered::Html(html) => Ok(Rendered::Text(crate::value::strip_tags(&html))),
                rendered => Ok(rendered),
            },
        }
    }
}

impl ColumnBuilder for Column {
    fn base(&self) -> &ColumnBase {
        match self {
            Column::Text(col) => col.base(),
            Column::Boolean(col) => col.base(),
            Column::Date(col) => col.base(),
            Column::Time(col) => col.base(),
            Column::Number(col) => col.base(),
        }
    }

    fn base_mut(&mut self) -> &mut ColumnBase {
        match self {
            Column::Text(col) => col.base_mut(),
            Column::Boolean(col) => col.base_mut(),
            Column::Date(col) => col.base_mut(),
            Column::Time(col) => col.base_mut(),
            Column::Number(col) => col.base_mut(),
        }
    }
}

impl From<TextColumn> for Column {
    fn from(col: TextColumn) -> Self {
        Column::Text(col)
    }
}

impl From<BooleanColumn> for Column {
    fn from(col: BooleanColumn) -> Self {
        Column::Boolean(col)
    }
}

impl From<DateColumn> for Column {
    fn from(col: DateColumn) -> Self {
        Column::Date(col)
    }
}

impl From<TimeColumn> for Column {
    fn from(col: TimeColumn) -> Self {
        Column::Time(col)
    }
}

impl From<NumberColumn> for Column {
    fn from(col: NumberColumn) -> Self {
        Column::Number(col)
    }
}
