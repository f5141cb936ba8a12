//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::api::OptionalField;

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 整数
    Int(i64),

    /// 浮動小数点数
    Float(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 日付時刻
    DateTime(NaiveDateTime),

    /// 日付部分のない時刻
    Time(NaiveTime),

    /// 経過時間（`[h]:mm:ss`などの書式）
    Duration(Duration),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 値を文字列に変換する
    ///
    /// 空セルは`None`を返します。呼び出し側では`"nan"`と同じく「値なし」として扱います。
    ///
    /// ```rust
    /// use xlsxcatalog::CellValue;
    ///
    /// assert_eq!(CellValue::Float(3.0).to_text().as_deref(), Some("3"));
    /// assert_eq!(CellValue::Float(2.5).to_text().as_deref(), Some("2.5"));
    /// assert_eq!(CellValue::Empty.to_text(), None);
    /// ```
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Int(i) => Some(i.to_string()),
            CellValue::Float(f) => Some(format_float(*f)),
            CellValue::String(s) => Some(s.clone()),
            CellValue::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
            CellValue::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            CellValue::Time(t) => Some(t.format("%H:%M:%S").to_string()),
            CellValue::Duration(d) => Some(format_duration(d)),
            CellValue::Error(e) => Some(e.clone()),
            CellValue::Empty => None,
        }
    }
}

/// 小数部が0の浮動小数点数は整数として表示する（`3.0` → `"3"`）
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// 経過時間を`[-][N day(s), ]H:MM:SS`形式で出力する
fn format_duration(d: &Duration) -> String {
    let sign = if *d < Duration::zero() { "-" } else { "" };
    let total = d.num_seconds().abs();
    let (days, rest) = (total / 86_400, total % 86_400);
    let clock = format!("{}:{:02}:{:02}", rest / 3600, rest % 3600 / 60, rest % 60);

    match days {
        0 => format!("{}{}", sign, clock),
        1 => format!("{}1 day, {}", sign, clock),
        n => format!("{}{} days, {}", sign, n, clock),
    }
}

/// ワークシートを表形式に読み込んだもの
///
/// 先頭行をヘッダー（列名）として扱い、残りの行をデータ行として保持します。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// 列名（ヘッダー行のセル値、前後の空白は除去済み）
    columns: Vec<String>,

    /// データ行
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// 新しい表を生成
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    /// 列名のリスト
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// データ行の数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列名から列インデックスを取得
    ///
    /// 同名の列が複数ある場合は最初の列を返します。
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// ヘッダーに存在する任意フィールド（固定順）
    pub fn optional_fields(&self) -> Vec<OptionalField> {
        let mut fields: Vec<OptionalField> = self
            .columns
            .iter()
            .filter_map(|name| OptionalField::from_column_name(name))
            .collect();
        fields.sort();
        fields.dedup();
        fields
    }

    /// データ行を順にたどるイテレータ
    pub fn rows(&self) -> impl Iterator<Item = SourceRow<'_>> {
        self.rows.iter().map(move |cells| SourceRow {
            table: self,
            cells,
        })
    }
}

/// 表の1行（列名 → セル値のビュー）
#[derive(Debug, Clone, Copy)]
pub struct SourceRow<'a> {
    table: &'a Table,
    cells: &'a [CellValue],
}

impl<'a> SourceRow<'a> {
    /// 列のセル値を取得
    ///
    /// 列が存在しない場合、または行が列に届かない場合は`None`を返します。
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        let index = self.table.column_index(column)?;
        self.cells.get(index)
    }

    /// 列の値を文字列として取得（列なし・空セルは`None`）
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).and_then(CellValue::to_text)
    }
}

/// 出力JSONの1レコード
///
/// 必須フィールドに加えて、存在する任意フィールドを同じオブジェクトに平坦化して出力します。
///
/// # 出力例
///
/// ```json
/// {
///   "filename": "single_skill_001.jpg",
///   "text_content": "フライングゲットの基本コール説明です。",
///   "last_updated": "2025-01-01T09:00:00.000000",
///   "keywords": ["フライングゲット", "コール"],
///   "category": "AKB48"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// 画像ファイル名（サイト側での照合キー）
    pub filename: String,

    #[serde(default)]
    pub text_content: String,

    /// 変換時刻（ISO 8601）
    pub last_updated: String,

    #[serde(default)]
    pub keywords: Vec<String>,

    /// 任意フィールド（キー順は`OptionalField`の宣言順）
    #[serde(flatten)]
    pub optional: BTreeMap<OptionalField, String>,
}

impl CatalogRecord {
    /// 任意フィールドの値を取得
    pub fn optional(&self, field: OptionalField) -> Option<&str> {
        self.optional.get(&field).map(String::as_str)
    }
}
