//! FILENAME: core/export/src/error.rs

use columns::ColumnError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Row {row}, column '{column}': {source}")]
    Column {
        row: usize,
        column: String,
        #[source]
        source: ColumnError,
    },

    #[error("Row {row} has {found} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}
