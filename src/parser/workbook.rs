//! Workbook Parser
//!
//! calamineを使用してワークブックの先頭シートを読み込み、
//! ヘッダー行と文字列化可能なセル値からなる`Table`に変換します。

use calamine::{open_workbook_auto_from_rs, Data, ExcelDateTime, Reader, Sheets};
use chrono::NaiveTime;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use crate::error::CatalogError;
use crate::security::SecurityConfig;
use crate::types::{CellValue, Table};

/// ワークブックパーサー
///
/// calamineのラッパーとして、ワークブック全体をメモリに読み込んでから解析します。
/// xlsx以外でもcalamineが開ける形式（xls, xlsb, ods）であれば受け付けます。
pub(crate) struct WorkbookParser {
    /// calamineのワークブック
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ファイルパスからワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - 読み込みと解析に成功した場合
    /// * `Err(CatalogError::Io)` - ファイルを読めない場合
    /// * `Err(CatalogError::SecurityViolation)` - サイズ上限を超える場合
    /// * `Err(CatalogError::Parse)` - ワークブックとして解析できない場合
    pub fn open_path(path: &Path, security: &SecurityConfig) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::open(file, security)
    }

    /// リーダーからワークブックを開く
    ///
    /// 上限+1バイトまでしか読み込まないため、巨大な入力でもメモリを使い切りません。
    pub fn open<R: Read>(reader: R, security: &SecurityConfig) -> Result<Self, CatalogError> {
        let mut buffer = Vec::new();
        reader
            .take(security.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;
        security.check_input_size(buffer.len() as u64)?;

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { workbook })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// 先頭シートを表として読み込む
    ///
    /// 先頭行をヘッダーとして扱います。シートが空の場合は列もデータ行もない表を返します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Table)` - 読み込みに成功した場合
    /// * `Err(CatalogError::Malformed)` - ワークシートが1つもない場合
    /// * `Err(CatalogError::Parse)` - シートの解析に失敗した場合
    pub fn first_sheet_table(&mut self) -> Result<Table, CatalogError> {
        let range = self
            .workbook
            .worksheet_range_at(0)
            .ok_or_else(|| CatalogError::Malformed("workbook has no worksheets".to_string()))??;

        let mut rows = range.rows();
        let columns: Vec<String> = match rows.next() {
            Some(header) => header
                .iter()
                .map(|cell| {
                    convert_cell(cell)
                        .to_text()
                        .map(|name| name.trim().to_string())
                        .unwrap_or_default()
                })
                .collect(),
            None => return Ok(Table::default()),
        };

        let data_rows = rows
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();

        Ok(Table::new(columns, data_rows))
    }
}

/// calamineのセル値を変換
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => dt
            .as_duration()
            .map(CellValue::Duration)
            .unwrap_or(CellValue::Float(dt.as_f64())),
        Data::DateTime(dt) => convert_datetime(dt),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

/// 日付時刻セルを変換
///
/// 日付部分のないシリアル値（0以上1未満）は時刻のみとして扱います。
/// 1904年システムのオフセットはcalamine側で適用されます。
fn convert_datetime(dt: &ExcelDateTime) -> CellValue {
    let serial = dt.as_f64();
    if (0.0..1.0).contains(&serial) {
        if let Some(time) = time_of_day(dt) {
            return CellValue::Time(time);
        }
    }
    dt.as_datetime()
        .map(CellValue::DateTime)
        .unwrap_or(CellValue::Float(serial))
}

fn time_of_day(dt: &ExcelDateTime) -> Option<NaiveTime> {
    Some(NaiveTime::from_hms_opt(0, 0, 0)? + dt.as_duration()?)
}
