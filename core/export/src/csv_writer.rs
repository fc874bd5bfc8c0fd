//! FILENAME: core/export/src/csv_writer.rs

use crate::{ExportCell, ExportError, ExportSheet};
use std::io::Write;
use std::path::Path;

/// Write the sheet as RFC 4180 CSV: one header record of labels, then rows.
pub fn write_csv<W: Write>(sheet: &ExportSheet, writer: W) -> Result<(), ExportError> {
    sheet.check_row_widths()?;
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(sheet.columns.iter().map(|c| c.label.as_str()))?;

    for row in &sheet.rows {
        csv.write_record(row.iter().map(ExportCell::to_export_string))?;
    }

    csv.flush()?;
    Ok(())
}

pub fn to_csv_bytes(sheet: &ExportSheet) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    write_csv(sheet, &mut buffer)?;
    Ok(buffer)
}

pub fn save_csv(sheet: &ExportSheet, path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(sheet, std::io::BufWriter::new(file))?;
    log::info!("exported {} rows to {:?}", sheet.rows.len(), path);
    Ok(())
}
