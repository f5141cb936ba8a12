//! Boundary Tests for xlsxcatalog
//!
//! 空のシート、ヘッダーのみ、サイズ上限などの境界条件を検証します。

use rust_xlsxwriter::*;
use serde_json::Value;
use std::fs;
use std::io::Cursor;
use xlsxcatalog::{CatalogError, ConversionOutcome, ConverterBuilder, Dataset};

// Helper module for generating boundary test fixtures
mod fixtures {
    use super::*;

    /// Generate a workbook with an empty sheet (no cells)
    pub fn generate_empty_sheet() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("EmptySheet")?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a workbook with a header row only
    pub fn generate_header_only() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "filename")?;
        worksheet.write_string(0, 1, "keywords")?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a table with a blank row between data rows
    pub fn generate_blank_row() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "filename")?;
        worksheet.write_string(0, 1, "keywords")?;
        worksheet.write_string(1, 0, "first.jpg")?;
        // row 2 is blank
        worksheet.write_string(3, 0, "second.jpg")?;
        worksheet.write_string(3, 1, "x")?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a workbook whose first sheet is the data sheet, second is ignored
    pub fn generate_two_sheets() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();

        let first = workbook.add_worksheet();
        first.set_name("Data")?;
        first.write_string(0, 0, "filename")?;
        first.write_string(1, 0, "from_first.jpg")?;

        let second = workbook.add_worksheet();
        second.set_name("Notes")?;
        second.write_string(0, 0, "filename")?;
        second.write_string(1, 0, "from_second.jpg")?;

        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a table whose header cells carry surrounding spaces
    pub fn generate_padded_header() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, " filename ")?;
        worksheet.write_string(0, 1, "category ")?;
        worksheet.write_string(1, 0, "a.jpg")?;
        worksheet.write_string(1, 1, "SKE48")?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a table with boolean, date and time cells
    pub fn generate_typed_cells() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let time_format = Format::new().set_num_format("hh:mm:ss");

        worksheet.write_string(0, 0, "filename")?;
        worksheet.write_string(0, 1, "category")?;
        worksheet.write_string(0, 2, "event_type")?;
        worksheet.write_string(0, 3, "description")?;

        worksheet.write_string(1, 0, "a.jpg")?;
        worksheet.write_boolean(1, 1, true)?;
        let date = ExcelDateTime::from_ymd(2024, 12, 8)?;
        worksheet.write_datetime_with_format(1, 2, &date, &date_format)?;
        let time = ExcelDateTime::from_hms(12, 30, 0)?;
        worksheet.write_datetime_with_format(1, 3, &time, &time_format)?;

        Ok(workbook.save_to_buffer()?)
    }
}

fn convert(data: Vec<u8>) -> Value {
    let converter = ConverterBuilder::new().build().unwrap();
    let json = converter.convert_to_string(Cursor::new(data)).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn test_empty_sheet() {
    let value = convert(fixtures::generate_empty_sheet().unwrap());
    assert_eq!(value, serde_json::json!([]));
}

#[test]
fn test_header_only() {
    let value = convert(fixtures::generate_header_only().unwrap());
    assert_eq!(value, serde_json::json!([]));
}

#[test]
fn test_blank_row_is_skipped() {
    let value = convert(fixtures::generate_blank_row().unwrap());
    let names: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["filename"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["first.jpg", "second.jpg"]);
    assert_eq!(value[0]["keywords"], serde_json::json!([]));
}

#[test]
fn test_only_first_sheet_is_read() {
    let value = convert(fixtures::generate_two_sheets().unwrap());
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["filename"], "from_first.jpg");
}

#[test]
fn test_header_names_are_trimmed() {
    let value = convert(fixtures::generate_padded_header().unwrap());
    assert_eq!(value[0]["filename"], "a.jpg");
    assert_eq!(value[0]["category"], "SKE48");
}

#[test]
fn test_typed_cells_are_coerced_to_text() {
    let value = convert(fixtures::generate_typed_cells().unwrap());
    assert_eq!(value[0]["category"], "True");
    assert_eq!(value[0]["event_type"], "2024-12-08 00:00:00");
    assert_eq!(value[0]["description"], "12:30:00");
}

#[test]
fn test_empty_input_is_parse_error() {
    let converter = ConverterBuilder::new().build().unwrap();
    let result = converter.convert_to_string(Cursor::new(Vec::<u8>::new()));
    assert!(matches!(result, Err(CatalogError::Parse(_))));
}

#[test]
fn test_oversized_input_is_rejected() {
    let data = fixtures::generate_header_only().unwrap();
    let converter = ConverterBuilder::new()
        .with_max_input_size(16)
        .build()
        .unwrap();

    match converter.convert_to_string(Cursor::new(data)) {
        Err(CatalogError::SecurityViolation(msg)) => assert!(msg.contains("max: 16 bytes")),
        other => panic!("Expected SecurityViolation, got {:?}", other),
    }
}

#[test]
fn test_oversized_source_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let source = Dataset::SingleSkill.source_path(dir.path());
    fs::create_dir_all(source.parent().unwrap()).unwrap();
    fs::write(&source, fixtures::generate_header_only().unwrap()).unwrap();

    let report = ConverterBuilder::new()
        .with_data_dir(dir.path())
        .with_max_input_size(16)
        .build()
        .unwrap()
        .convert_dataset(Dataset::SingleSkill)
        .unwrap();

    assert!(matches!(report.outcome, ConversionOutcome::Fallback { .. }));
    assert_eq!(fs::read_to_string(&report.destination).unwrap().trim(), "[]");
}

#[test]
fn test_destination_directories_are_created() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let converter = ConverterBuilder::new().with_data_dir(&nested).build().unwrap();

    let report = converter.convert_dataset(Dataset::CallBook).unwrap();
    assert_eq!(report.outcome, ConversionOutcome::SourceMissing);
    assert!(nested.join("json").join("call_book.json").exists());
}
