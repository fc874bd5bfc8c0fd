//! FILENAME: core/export/tests/test_export.rs
//! PURPOSE: Writes rendered datatables to CSV and XLSX and reads them back.

use calamine::{open_workbook, Data, Reader, Xlsx};
use columns::{
    BooleanColumn, CellValue, Column, ColumnBuilder, DatatablesConfig, DateColumn, NumberColumn,
    RenderContext, TemplateViews, TextColumn,
};
use export::{
    save_csv, save_xlsx, to_csv_bytes, to_xlsx_bytes, ExportCell, ExportError, ExportSheet,
};
use tempfile::tempdir;

fn staff_columns() -> Vec<Column> {
    vec![
        TextColumn::new("name").with_label("Name").into(),
        BooleanColumn::new("active").with_label("Active").into(),
        DateColumn::new("joined").with_label("Joined").format("Y-m-d").into(),
        NumberColumn::new("salary").with_label("Salary").format(2, ".", ",").into(),
        NumberColumn::new("rating").with_label("Rating").round(1).into(),
    ]
}

fn staff_rows() -> Vec<Vec<CellValue>> {
    vec![
        vec![
            CellValue::text("Alice"),
            CellValue::Boolean(true),
            CellValue::text("2024-01-15 09:30:00"),
            CellValue::Number(75000.0),
            CellValue::Number(4.25),
        ],
        vec![
            CellValue::text("Bob, Jr."),
            CellValue::Integer(0),
            CellValue::Empty,
            CellValue::Integer(1234),
            CellValue::Empty,
        ],
    ]
}

fn build_sheet() -> ExportSheet {
    let config = DatatablesConfig::default();
    let views = TemplateViews::new();
    let ctx = RenderContext::new(&config, &views);
    ExportSheet::build(&staff_columns(), &staff_rows(), &ctx).unwrap()
}

// ============================================================================
// CSV
// ============================================================================

#[test]
fn test_csv_output() {
    let bytes = to_csv_bytes(&build_sheet()).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    let expected = "\
Name,Active,Joined,Salary,Rating
Alice,Yes,2024-01-15,\"75,000.00\",4.3
\"Bob, Jr.\",No,,\"1,234.00\",
";
    assert_eq!(text, expected);
}

#[test]
fn test_save_csv_to_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.csv");

    save_csv(&build_sheet(), &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, vec!["Name", "Active", "Joined", "Salary", "Rating"]);

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[1][0], "Bob, Jr.");
    assert_eq!(&records[1][1], "No");
}

fn id_sheet() -> ExportSheet {
    let config = DatatablesConfig::default();
    let views = TemplateViews::new();
    let ctx = RenderContext::new(&config, &views);

    let columns: Vec<Column> = vec![TextColumn::new("id").into(), NumberColumn::new("n").into()];
    let rows = vec![vec![
        CellValue::Integer(1234567890123456789),
        CellValue::Integer(9007199254740993),
    ]];
    ExportSheet::build(&columns, &rows, &ctx).unwrap()
}

#[test]
fn test_csv_keeps_large_integers_exact() {
    let text = String::from_utf8(to_csv_bytes(&id_sheet()).unwrap()).unwrap();
    assert_eq!(text, "id,n\n1234567890123456789,9007199254740993\n");
}

#[test]
fn test_csv_rejects_rows_wider_than_header() {
    let mut sheet = build_sheet();
    sheet.rows[0].push(ExportCell::Text("extra".to_string()));

    let err = to_csv_bytes(&sheet).unwrap_err();
    assert!(matches!(err, ExportError::RowWidth { row: 0, expected: 5, found: 6 }));
}

// ============================================================================
// XLSX
// ============================================================================

#[test]
fn test_xlsx_rejects_rows_wider_than_header() {
    let mut sheet = build_sheet();
    sheet.rows[1].push(ExportCell::Integer(1));

    let err = to_xlsx_bytes(&sheet).unwrap_err();
    assert!(matches!(err, ExportError::RowWidth { row: 1, expected: 5, found: 6 }));
}

#[test]
fn test_xlsx_large_integers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ids.xlsx");

    save_xlsx(&id_sheet(), &path).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let range = workbook.worksheet_range("Datatable").unwrap();
    // Beyond 2^53 the value is kept as text so no digit is lost
    assert_eq!(
        range.get_value((1, 0)),
        Some(&Data::String("1234567890123456789".to_string()))
    );
    assert_eq!(
        range.get_value((1, 1)),
        Some(&Data::String("9007199254740993".to_string()))
    );
}

#[test]
fn test_save_xlsx_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.xlsx");

    save_xlsx(&build_sheet().with_name("Staff"), &path).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    assert_eq!(workbook.sheet_names().to_vec(), vec!["Staff".to_string()]);

    let range = workbook.worksheet_range("Staff").unwrap();
    assert_eq!(range.get_value((0, 0)), Some(&Data::String("Name".to_string())));
    assert_eq!(range.get_value((0, 4)), Some(&Data::String("Rating".to_string())));

    assert_eq!(range.get_value((1, 1)), Some(&Data::String("Yes".to_string())));
    assert_eq!(range.get_value((1, 2)), Some(&Data::String("2024-01-15".to_string())));
    // Formatted numbers are text, rounded numbers stay numeric
    assert_eq!(range.get_value((1, 3)), Some(&Data::String("75,000.00".to_string())));
    assert_eq!(range.get_value((1, 4)), Some(&Data::Float(4.3)));

    assert_eq!(range.get_value((2, 1)), Some(&Data::String("No".to_string())));
}

#[test]
fn test_xlsx_bytes_are_a_zip_archive() {
    let bytes = to_xlsx_bytes(&build_sheet()).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_invalid_sheet_name_is_rejected() {
    let sheet = build_sheet().with_name("bad/name");
    let err = to_xlsx_bytes(&sheet).unwrap_err();
    assert!(matches!(err, ExportError::XlsxWrite(_)));
}
