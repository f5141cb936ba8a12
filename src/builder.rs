//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use rayon::prelude::*;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::api::{Dataset, OptionalField, TimestampSource};
use crate::error::CatalogError;
use crate::normalizer::normalize_row;
use crate::output::{render_records, write_records};
use crate::parser::WorkbookParser;
use crate::security::SecurityConfig;
use crate::types::{CatalogRecord, Table};

/// データディレクトリのデフォルト値
pub const DEFAULT_DATA_DIR: &str = "docs/data";

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// データディレクトリ（`excel/`と`json/`を含む）
    pub data_dir: PathBuf,

    /// 認識する任意フィールド
    pub optional_fields: Vec<OptionalField>,

    /// `last_updated`の取得方法
    pub timestamp: TimestampSource,

    /// 入力ファイルのセキュリティ制限
    pub security: SecurityConfig,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            optional_fields: OptionalField::ALL.to_vec(),
            timestamp: TimestampSource::Now,
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcatalog::ConverterBuilder;
///
/// # fn main() -> Result<(), xlsxcatalog::CatalogError> {
/// let converter = ConverterBuilder::new()
///     .with_data_dir("site/data")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - データディレクトリ: `docs/data`
    /// - 任意フィールド: `category`, `song_name`, `difficulty`, `event_type`, `description`
    /// - タイムスタンプ: 実行時のローカル時刻
    /// - 入力ファイルの最大サイズ: 100MB
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// データディレクトリを指定する
    ///
    /// 入力は`<data_dir>/excel/<dataset>.xlsx`、出力は`<data_dir>/json/<dataset>.json`です。
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = data_dir.into();
        self
    }

    /// 認識する任意フィールドを制限する
    ///
    /// ここに含まれないフィールドは、列が存在してもレコードへコピーされません。
    /// 出力順は常に`OptionalField`の宣言順です。
    pub fn with_optional_fields(mut self, fields: &[OptionalField]) -> Self {
        let mut fields = fields.to_vec();
        fields.sort();
        fields.dedup();
        self.config.optional_fields = fields;
        self
    }

    /// `last_updated`の取得方法を指定する
    pub fn with_timestamp(mut self, timestamp: TimestampSource) -> Self {
        self.config.timestamp = timestamp;
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `CatalogError::Config(String)`: 設定の検証に失敗した場合
    ///   * データディレクトリが空
    ///   * 入力ファイルの最大サイズが0
    pub fn build(self) -> Result<Converter, CatalogError> {
        if self.config.data_dir.as_os_str().is_empty() {
            return Err(CatalogError::Config(
                "Data directory must not be empty".to_string(),
            ));
        }

        if self.config.security.max_input_file_size == 0 {
            return Err(CatalogError::Config(
                "Maximum input size must be greater than 0".to_string(),
            ));
        }

        Ok(Converter {
            config: self.config,
        })
    }
}

/// データセット1件の変換結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// 変換に成功し、`records`件のレコードを書き出した
    Converted { records: usize },

    /// 入力ファイルが存在しないため、空の配列を書き出した
    SourceMissing,

    /// 入力の読み込み・解析に失敗したため、空の配列を書き出した
    Fallback { reason: String },
}

/// 変換結果のレポート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub outcome: ConversionOutcome,
}

impl ConversionReport {
    /// 書き出したレコード数
    pub fn records_written(&self) -> usize {
        match self.outcome {
            ConversionOutcome::Converted { records } => records,
            ConversionOutcome::SourceMissing | ConversionOutcome::Fallback { .. } => 0,
        }
    }
}

/// 変換処理のファサード
///
/// ワークブックを読み込み、各行を正規化し、JSON配列として書き出します。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcatalog::{ConverterBuilder, Dataset};
///
/// # fn main() -> Result<(), xlsxcatalog::CatalogError> {
/// let converter = ConverterBuilder::new().build()?;
/// let report = converter.convert_dataset(Dataset::CallBook)?;
/// println!("{} records", report.records_written());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,
}

impl Converter {
    /// データディレクトリ
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// 入力ワークブックが存在するデータセット
    pub fn available_sources(&self) -> Vec<Dataset> {
        Dataset::ALL
            .into_iter()
            .filter(|d| d.source_path(&self.config.data_dir).exists())
            .collect()
    }

    /// 表のすべての行を正規化する
    ///
    /// `last_updated`は呼び出し1回につき1度だけ取得し、全レコードで共有します。
    /// スキップされた行を除き、行の順序を保持します。
    pub fn convert_table(&self, table: &Table) -> Vec<CatalogRecord> {
        let last_updated = self.config.timestamp.timestamp();
        let optional_fields: Vec<OptionalField> = table
            .optional_fields()
            .into_iter()
            .filter(|f| self.config.optional_fields.contains(f))
            .collect();

        table
            .rows()
            .filter_map(|row| normalize_row(&row, &optional_fields, &last_updated))
            .collect()
    }

    /// ワークブックの先頭シートをレコードに変換する
    fn read_records(&self, mut parser: WorkbookParser) -> Result<Vec<CatalogRecord>, CatalogError> {
        log::debug!("Sheets found: {:?}", parser.sheet_names());

        let table = parser.first_sheet_table()?;
        log::info!("Read {} rows ({} columns)", table.len(), table.columns().len());

        Ok(self.convert_table(&table))
    }

    /// ワークブックをJSON配列に変換してライターに出力する
    ///
    /// # 戻り値
    ///
    /// * `Ok(usize)` - 書き出したレコード数
    /// * `Err(CatalogError)` - 読み込み・解析・書き込みに失敗した場合
    ///
    /// ファイル単位のフォールバック処理は行いません（`convert_file`を参照）。
    pub fn convert<R: Read, W: Write>(&self, input: R, mut output: W) -> Result<usize, CatalogError> {
        let parser = WorkbookParser::open(input, &self.config.security)?;
        let records = self.read_records(parser)?;
        render_records(&mut output, &records)?;
        output.flush()?;
        Ok(records.len())
    }

    /// ワークブックをJSON文字列に変換する
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, CatalogError> {
        let mut buffer = Vec::new();
        self.convert(input, &mut buffer)?;

        String::from_utf8(buffer).map_err(|e| {
            CatalogError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    /// 入力ファイルを変換して出力ファイルに書き出す
    ///
    /// # 処理フロー
    ///
    /// 1. 入力が存在しない場合は警告を出し、空の配列を書き出す
    /// 2. 読み込み・解析に失敗した場合はエラーを記録し、空の配列を書き出す
    /// 3. 成功した場合はレコード配列を書き出す
    ///
    /// # 戻り値
    ///
    /// * `Ok(ConversionReport)` - 出力ファイルを書き出した場合（フォールバックを含む）
    /// * `Err(CatalogError)` - 出力ファイルの書き込みに失敗した場合
    pub fn convert_file(
        &self,
        source: &Path,
        destination: &Path,
    ) -> Result<ConversionReport, CatalogError> {
        let report = |outcome: ConversionOutcome| ConversionReport {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            outcome,
        };

        if !source.exists() {
            log::warn!("Source workbook not found: {}", source.display());
            write_records(destination, &[])?;
            return Ok(report(ConversionOutcome::SourceMissing));
        }

        let records = WorkbookParser::open_path(source, &self.config.security)
            .and_then(|parser| self.read_records(parser));

        match records {
            Ok(records) => {
                write_records(destination, &records)?;
                log::info!(
                    "Wrote {} ({} records)",
                    destination.display(),
                    records.len()
                );
                Ok(report(ConversionOutcome::Converted {
                    records: records.len(),
                }))
            }
            Err(e) => {
                log::error!("Failed to convert {}: {}", source.display(), e);
                write_records(destination, &[])?;
                Ok(report(ConversionOutcome::Fallback {
                    reason: e.to_string(),
                }))
            }
        }
    }

    /// データセットを変換する
    pub fn convert_dataset(&self, dataset: Dataset) -> Result<ConversionReport, CatalogError> {
        log::info!("Converting {}", dataset);
        self.convert_file(
            &dataset.source_path(&self.config.data_dir),
            &dataset.destination_path(&self.config.data_dir),
        )
    }

    /// 既知のすべてのデータセットを変換する
    ///
    /// データセットは互いに別のファイルを読み書きするため並列に処理します。
    /// 結果は`Dataset::ALL`の順で返し、1件の失敗が他のデータセットを止めることはありません。
    pub fn convert_all(&self) -> Vec<(Dataset, Result<ConversionReport, CatalogError>)> {
        Dataset::ALL[..]
            .par_iter()
            .map(|dataset| (*dataset, self.convert_dataset(*dataset)))
            .collect()
    }
}
