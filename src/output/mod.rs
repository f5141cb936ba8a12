//! Output Module
//!
//! レコード配列のJSON書き出しと、書き出し済みファイルの検証を提供するモジュール。

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::CatalogError;
use crate::types::CatalogRecord;

/// レコード配列をJSONとして書き出す
///
/// 出力はUTF-8、2スペースインデントで、ASCII以外の文字はエスケープせずにそのまま出力します。
/// 出力先ディレクトリが存在しない場合は、途中のディレクトリも含めて作成します。
///
/// # 戻り値
///
/// * `Ok(())` - 書き出しに成功した場合
/// * `Err(CatalogError)` - ディレクトリ作成・書き込み・シリアライズに失敗した場合
pub(crate) fn write_records(path: &Path, records: &[CatalogRecord]) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    render_records(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

/// レコード配列をライターに出力する
pub(crate) fn render_records<W: Write>(
    writer: &mut W,
    records: &[CatalogRecord],
) -> Result<(), CatalogError> {
    serde_json::to_writer_pretty(&mut *writer, records)?;
    writeln!(writer)?;
    Ok(())
}

/// 書き出し済みJSONファイルの検証結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSummary {
    /// レコード数
    pub record_count: usize,

    /// 先頭レコードのファイル名とキーワード（ログ表示用）
    pub first: Option<(String, Vec<String>)>,
}

/// 書き出し済みJSONファイルを読み直し、レコード配列であることを確認する
///
/// # 戻り値
///
/// * `Ok(ValidationSummary)` - 配列として読み込めた場合
/// * `Err(CatalogError::Io)` - ファイルが存在しない・読めない場合
/// * `Err(CatalogError::Json)` - 配列でない、またはレコードとして解釈できない場合
///
/// ```rust,no_run
/// use std::path::Path;
/// use xlsxcatalog::validate_output;
///
/// # fn main() -> Result<(), xlsxcatalog::CatalogError> {
/// let summary = validate_output(Path::new("docs/data/json/call_book.json"))?;
/// println!("{} records", summary.record_count);
/// # Ok(())
/// # }
/// ```
pub fn validate_output(path: &Path) -> Result<ValidationSummary, CatalogError> {
    let reader = BufReader::new(File::open(path)?);
    let records: Vec<CatalogRecord> = serde_json::from_reader(reader)?;

    Ok(ValidationSummary {
        record_count: records.len(),
        first: records
            .into_iter()
            .next()
            .map(|record| (record.filename, record.keywords)),
    })
}
