//! FILENAME: core/columns/src/lib.rs
//! PURPOSE: Main library entry point for the datatable column formatters.
//! CONTEXT: Re-exports public types and modules for use by the export crate
//! and by host applications that render tables.

pub mod column;
pub mod config;
pub mod date_format;
pub mod error;
pub mod number_format;
pub mod value;
pub mod view;

// Re-export commonly used types at the crate root
pub use column::{
    BooleanColumn, Column, ColumnBase, ColumnBuilder, ColumnType, DateColumn, NumberColumn,
    NumberMode, RenderContext, TextAlign, TextColumn, TimeColumn,
};
pub use config::DatatablesConfig;
pub use date_format::{parse_datetime, DatePattern};
pub use error::{ColumnError, ConfigError};
pub use number_format::{
    format_general, format_integer_with_separators, format_with_separators,
    round_half_away_from_zero,
};
pub use value::{CellValue, Rendered};
pub use view::{TemplateViews, ViewRenderer, BOOLEAN_VIEW};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_renders_a_row() {
        let config = DatatablesConfig::new().with_default_date_format("Y-m-d");
        let views = TemplateViews::new();
        let ctx = RenderContext::new(&config, &views);

        let columns: Vec<Column> = vec![
            TextColumn::new("name").into(),
            BooleanColumn::new("active").into(),
            DateColumn::new("joined").into(),
            NumberColumn::new("salary").format(2, ".", ",").into(),
        ];
        let row = vec![
            CellValue::text("Alice"),
            CellValue::Boolean(true),
            CellValue::text("2024-01-15 09:30:00"),
            CellValue::Number(75000.0),
        ];

        let exported: Vec<String> = columns
            .iter()
            .zip(&row)
            .map(|(column, value)| {
                column
                    .render_for_export(value, &ctx)
                    .map(|r| r.to_export_string())
            })
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(exported, vec!["Alice", "Yes", "2024-01-15", "75,000.00"]);
    }

    #[test]
    fn columns_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Column>();
        assert_send_sync::<DatatablesConfig>();
        assert_send_sync::<TemplateViews>();
    }
}
