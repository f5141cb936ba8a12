//! Row Normalizer Module
//!
//! ワークブックの1行を出力レコードへ変換する純粋関数を提供するモジュール。
//! 不正な行は例外ではなく`None`（スキップ）として扱います。

use std::collections::BTreeMap;

use crate::api::OptionalField;
use crate::types::{CatalogRecord, SourceRow};

/// ファイル名の最小文字数
const MIN_FILENAME_CHARS: usize = 2;

/// キーワードの区切り文字（全角カンマ、半角カンマ、読点）
///
/// 空白は区切り文字ではありません。
const KEYWORD_DELIMITERS: [char; 3] = ['\u{FF0C}', ',', '\u{3001}'];

/// 値が「なし」を表すテキストかどうか（大文字小文字を区別しない`nan`）
pub(crate) fn is_nan_text(s: &str) -> bool {
    s.eq_ignore_ascii_case("nan")
}

/// キーワード文字列をリストに分割
///
/// 区切り文字の連続は1つの区切りとして扱い、各要素の前後の空白を除去し、
/// 空の要素を取り除きます。順序と重複は保持します。
///
/// ```rust
/// use xlsxcatalog::split_keywords;
///
/// assert_eq!(split_keywords("a，b、c"), vec!["a", "b", "c"]);
/// assert_eq!(split_keywords("foo bar"), vec!["foo bar"]);
/// ```
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(|c: char| KEYWORD_DELIMITERS.contains(&c))
        .map(str::trim)
        .filter(|kw| !kw.is_empty())
        .map(str::to_string)
        .collect()
}

/// ファイル名が有効かどうか（空でない、`nan`でない、2文字以上）
fn is_valid_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !is_nan_text(filename)
        && filename.chars().count() >= MIN_FILENAME_CHARS
}

/// 1行を出力レコードに変換する
///
/// # 引数
///
/// * `row` - 変換する行
/// * `optional_fields` - ヘッダーに存在する任意フィールド
/// * `last_updated` - 変換時刻（行ごとではなく、変換1回につき1つの値）
///
/// # 戻り値
///
/// * `Some(CatalogRecord)` - 有効な行の場合
/// * `None` - ファイル名が空、`nan`、または2文字未満の場合
///
/// 列が存在しない場合は空文字列（`text_content`）・空リスト（`keywords`）・
/// 省略（任意フィールド）として扱い、失敗することはありません。
pub fn normalize_row(
    row: &SourceRow<'_>,
    optional_fields: &[OptionalField],
    last_updated: &str,
) -> Option<CatalogRecord> {
    // 1. ファイル名
    let filename = row.text("filename").unwrap_or_default().trim().to_string();
    if !is_valid_filename(&filename) {
        return None;
    }

    // 2. 本文
    let text_content = match row.text("text_content") {
        Some(text) if !is_nan_text(text.trim()) => text.trim().to_string(),
        _ => String::new(),
    };

    // 3. キーワード（区切り前の生の値で`nan`判定）
    let keywords = match row.text("keywords") {
        Some(raw) if !is_nan_text(&raw) => split_keywords(&raw),
        _ => Vec::new(),
    };

    // 4. 任意フィールド（値はトリムせずにコピー）
    let optional: BTreeMap<OptionalField, String> = optional_fields
        .iter()
        .filter_map(|field| {
            row.text(field.column_name())
                .filter(|value| !is_nan_text(value))
                .map(|value| (*field, value))
        })
        .collect();

    Some(CatalogRecord {
        filename,
        text_content,
        last_updated: last_updated.to_string(),
        keywords,
        optional,
    })
}
