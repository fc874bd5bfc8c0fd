//! FILENAME: core/export/src/xlsx_writer.rs

use crate::{ExportCell, ExportError, ExportSheet};
use columns::TextAlign;
use rust_xlsxwriter::{Format, FormatAlign, Workbook as XlsxWorkbook};
use std::path::Path;

pub fn save_xlsx(sheet: &ExportSheet, path: &Path) -> Result<(), ExportError> {
    let mut xlsx = build_workbook(sheet)?;
    xlsx.save(path)?;
    log::info!("exported {} rows to {:?}", sheet.rows.len(), path);
    Ok(())
}

pub fn to_xlsx_bytes(sheet: &ExportSheet) -> Result<Vec<u8>, ExportError> {
    let mut xlsx = build_workbook(sheet)?;
    Ok(xlsx.save_to_buffer()?)
}

/// Largest integer an XLSX number cell holds exactly.
const MAX_EXACT_INTEGER: i64 = 1 << 53;

fn build_workbook(sheet: &ExportSheet) -> Result<XlsxWorkbook, ExportError> {
    sheet.check_row_widths()?;

    let mut xlsx = XlsxWorkbook::new();
    let worksheet = xlsx.add_worksheet();
    worksheet.set_name(&sheet.name)?;

    // Header row
    for (col, column) in sheet.columns.iter().enumerate() {
        let format = Format::new()
            .set_bold()
            .set_align(convert_align(column.header_align));
        worksheet.write_string_with_format(0, col as u16, &column.label, &format)?;
    }

    let content_formats: Vec<Format> = sheet
        .columns
        .iter()
        .map(|c| Format::new().set_align(convert_align(c.content_align)))
        .collect();

    // Data rows start below the header
    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let row_num = row_idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            let format = &content_formats[col];
            match cell {
                ExportCell::Empty => {}
                ExportCell::Integer(i) if i.unsigned_abs() <= MAX_EXACT_INTEGER as u64 => {
                    worksheet.write_number_with_format(row_num, col as u16, *i as f64, format)?;
                }
                // Wider integers would lose digits as numbers
                ExportCell::Integer(i) => {
                    worksheet.write_string_with_format(row_num, col as u16, i.to_string(), format)?;
                }
                ExportCell::Number(n) => {
                    worksheet.write_number_with_format(row_num, col as u16, *n, format)?;
                }
                ExportCell::Text(s) => {
                    worksheet.write_string_with_format(row_num, col as u16, s, format)?;
                }
            }
        }
    }

    Ok(xlsx)
}

fn convert_align(align: TextAlign) -> FormatAlign {
    match align {
        TextAlign::Left => FormatAlign::Left,
        TextAlign::Center => FormatAlign::Center,
        TextAlign::Right => FormatAlign::Right,
    }
}
