//! xlsxcatalog - Spreadsheet to JSON catalog converter for the fan site
//!
//! 単技（single skill）とCall本（call book）のワークブックを読み込み、
//! 静的サイトが参照するJSON配列に変換するクレートです。
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xlsxcatalog::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // docs/data/excel/*.xlsx -> docs/data/json/*.json
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     for (dataset, result) in converter.convert_all() {
//!         let report = result?;
//!         println!("{}: {} records", dataset, report.records_written());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Convert to String
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxcatalog::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!     let input = File::open("call_book.xlsx")?;
//!
//!     let json = converter.convert_to_string(input)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Row Normalization
//!
//! ```rust
//! use xlsxcatalog::{normalize_row, CellValue, Table};
//!
//! let table = Table::new(
//!     vec!["filename".into(), "keywords".into(), "category".into()],
//!     vec![vec![
//!         CellValue::String("single_skill_001.jpg".into()),
//!         CellValue::String("フライングゲット,コール".into()),
//!         CellValue::String("AKB48".into()),
//!     ]],
//! );
//! let fields = table.optional_fields();
//! let row = table.rows().next().unwrap();
//!
//! let record = normalize_row(&row, &fields, "2025-01-01T09:00:00.000000").unwrap();
//! assert_eq!(record.keywords, vec!["フライングゲット", "コール"]);
//! ```

mod api;
mod builder;
mod error;
mod normalizer;
mod output;
mod parser;
mod samples;
mod security;
mod types;

// 公開API
pub use api::{Dataset, OptionalField, TimestampSource};
pub use builder::{
    ConversionOutcome, ConversionReport, Converter, ConverterBuilder, DEFAULT_DATA_DIR,
};
pub use error::CatalogError;
pub use normalizer::{normalize_row, split_keywords};
pub use output::{validate_output, ValidationSummary};
pub use samples::{create_sample_workbooks, sample_workbook};
pub use types::{CatalogRecord, CellValue, SourceRow, Table};
