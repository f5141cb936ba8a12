//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// 変換対象のデータセット
///
/// データセットごとに入力ワークブックと出力JSONのパスが固定されています。
/// 動的なデータセット探索は行いません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// 単技（`excel/single_skill.xlsx` → `json/single_skill.json`）
    SingleSkill,

    /// Call本（`excel/call_book.xlsx` → `json/call_book.json`）
    CallBook,
}

impl Dataset {
    /// 既知のすべてのデータセット（処理順）
    pub const ALL: [Dataset; 2] = [Dataset::SingleSkill, Dataset::CallBook];

    /// ファイル名の幹（拡張子なし）
    pub fn stem(&self) -> &'static str {
        match self {
            Dataset::SingleSkill => "single_skill",
            Dataset::CallBook => "call_book",
        }
    }

    /// データディレクトリからの入力ワークブックのパス
    pub fn source_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join("excel").join(format!("{}.xlsx", self.stem()))
    }

    /// データディレクトリからの出力JSONのパス
    pub fn destination_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join("json").join(format!("{}.json", self.stem()))
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// 任意フィールド
///
/// ヘッダーに列が存在し、かつ値が`nan`でない場合にのみレコードへコピーされる列です。
/// 宣言順がJSON出力時のキー順になります。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionalField {
    Category,
    SongName,
    Difficulty,
    EventType,
    Description,
}

impl OptionalField {
    /// 固定の任意フィールド集合
    pub const ALL: [OptionalField; 5] = [
        OptionalField::Category,
        OptionalField::SongName,
        OptionalField::Difficulty,
        OptionalField::EventType,
        OptionalField::Description,
    ];

    /// ワークブック上の列名
    pub fn column_name(&self) -> &'static str {
        match self {
            OptionalField::Category => "category",
            OptionalField::SongName => "song_name",
            OptionalField::Difficulty => "difficulty",
            OptionalField::EventType => "event_type",
            OptionalField::Description => "description",
        }
    }

    /// 列名から任意フィールドを取得（該当なしは`None`）
    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column_name() == name)
    }
}

impl fmt::Display for OptionalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// `last_updated`に書き込むタイムスタンプの取得方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum TimestampSource {
    /// 変換実行時のローカル時刻（デフォルト）
    #[default]
    Now,

    /// 固定時刻
    ///
    /// 同じ入力から同じバイト列を得たい場合に使用します。
    ///
    /// ```rust,no_run
    /// use chrono::NaiveDate;
    /// use xlsxcatalog::{ConverterBuilder, TimestampSource};
    ///
    /// # fn main() -> Result<(), xlsxcatalog::CatalogError> {
    /// let at = NaiveDate::from_ymd_opt(2025, 1, 1)
    ///     .and_then(|d| d.and_hms_opt(9, 0, 0))
    ///     .unwrap();
    /// let converter = ConverterBuilder::new()
    ///     .with_timestamp(TimestampSource::Fixed(at))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Fixed(NaiveDateTime),
}

impl TimestampSource {
    /// ISO 8601形式（マイクロ秒まで、タイムゾーンなし）のタイムスタンプ文字列
    ///
    /// 例: `2025-01-01T09:00:00.000000`
    pub fn timestamp(&self) -> String {
        let at = match self {
            TimestampSource::Now => Local::now().naive_local(),
            TimestampSource::Fixed(at) => *at,
        };
        at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_dataset_paths() {
        let root = Path::new("docs/data");
        assert_eq!(
            Dataset::SingleSkill.source_path(root),
            PathBuf::from("docs/data/excel/single_skill.xlsx")
        );
        assert_eq!(
            Dataset::CallBook.destination_path(root),
            PathBuf::from("docs/data/json/call_book.json")
        );
        assert_eq!(Dataset::CallBook.to_string(), "call_book");
    }

    #[test]
    fn test_optional_field_column_names() {
        for field in OptionalField::ALL {
            assert_eq!(OptionalField::from_column_name(field.column_name()), Some(field));
        }
        assert_eq!(OptionalField::from_column_name("filename"), None);
        assert_eq!(OptionalField::from_column_name("Category"), None);
    }

    #[test]
    fn test_optional_field_serializes_as_column_name() {
        let json = serde_json::to_string(&OptionalField::EventType).unwrap();
        assert_eq!(json, "\"event_type\"");
    }

    #[test]
    fn test_fixed_timestamp_format() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_micro_opt(5, 6, 7, 89)
            .unwrap();
        assert_eq!(
            TimestampSource::Fixed(at).timestamp(),
            "2025-03-04T05:06:07.000089"
        );
    }

    #[test]
    fn test_now_timestamp_is_parseable() {
        let ts = TimestampSource::Now.timestamp();
        assert!(NaiveDateTime::parse_from_str(&ts, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }
}
