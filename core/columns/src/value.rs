//! FILENAME: core/columns/src/value.rs
//! PURPOSE: Raw cell values as they arrive from the data source, and the
//! rendered output a column produces from them.
//! CONTEXT: `CellValue` is the input side of every column formatter;
//! `Rendered` is the output side handed to the table renderer or exporter.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::number_format::format_general;

/// A raw value for one cell, as loaded from the database row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Boolean(bool),
    Integer(i64),
    Number(f64),
    // Text precedes DateTime so JSON strings always load as text
    Text(String),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// Truthiness as the host templating layer sees it.
    ///
    /// Falsy: `Empty`, `false`, `0`, `0.0` (either sign), `""` and `"0"`.
    /// Everything else is truthy, including `NaN`, `"0.0"`, `" "` and `"false"`.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Boolean(b) => *b,
            CellValue::Integer(i) => *i != 0,
            // NaN != 0.0, so NaN stays truthy
            CellValue::Number(n) => *n != 0.0,
            CellValue::DateTime(_) => true,
            CellValue::Text(s) => !(s.is_empty() || s == "0"),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric view of the value. Text is accepted when it parses as a number
    /// after trimming surrounding whitespace.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            CellValue::Empty => "null".to_string(),
            CellValue::Boolean(b) => format!("boolean {}", b),
            CellValue::Integer(i) => format!("integer {}", i),
            CellValue::Number(n) => format!("number {}", n),
            CellValue::DateTime(dt) => format!("datetime {}", dt),
            CellValue::Text(s) => format!("'{}'", s),
        }
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Integer(value as i64)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// What a column produces for one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Rendered {
    Empty,
    /// An integer kept exact, never routed through `f64`.
    Integer(i64),
    Number(f64),
    Text(String),
    /// A rendered view fragment (markup).
    Html(String),
}

impl Rendered {
    pub fn is_empty(&self) -> bool {
        matches!(self, Rendered::Empty)
    }

    /// Plain text written to CSV/XLSX exports.
    pub fn to_export_string(&self) -> String {
        match self {
            Rendered::Empty => String::new(),
            Rendered::Integer(i) => i.to_string(),
            Rendered::Number(n) => format_general(*n),
            Rendered::Text(s) => s.clone(),
            Rendered::Html(html) => strip_tags(html),
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Html(html) => f.write_str(html),
            other => f.write_str(&other.to_export_string()),
        }
    }
}

/// Remove markup from a fragment, collapse whitespace and decode the
/// handful of entities the templates emit.
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    // Open quote inside a tag; `>` does not close the tag while set
    let mut quote: Option<char> = None;

    for c in html.chars() {
        if !in_tag {
            if c == '<' {
                in_tag = true;
            } else {
                text.push(c);
            }
            continue;
        }

        match (c, quote) {
            ('"' | '\'', None) => quote = Some(c),
            (_, Some(open)) if c == open => quote = None,
            ('>', None) => {
                in_tag = false;
                text.push(' ');
            }
            _ => {}
        }
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
