//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsxcatalogクレート全体で使用するエラー型
///
/// ワークブックの読み込み、JSONの書き出し、サンプル生成の各処理で発生する
/// エラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（書き込み失敗など）
/// - `Parse`: ワークブックの解析中に発生したエラー（calamine由来）
/// - `Json`: JSONのシリアライズ・デシリアライズ中に発生したエラー
/// - `Xlsx`: サンプルワークブックの生成中に発生したエラー
/// - `Config`: 設定の検証に失敗したエラー
/// - `Malformed`: ワークブックの構造が想定外（シートなし、ヘッダーなし）
/// - `SecurityViolation`: 入力サイズ制限などに違反したエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcatalog::CatalogError;
/// use std::fs::File;
///
/// fn open_source(path: &str) -> Result<(), CatalogError> {
///     let _file = File::open(path)?; // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックの解析中に発生したエラー
    ///
    /// 破損したファイルやサポートされていない形式が原因となります。
    #[error("Failed to parse workbook: {0}")]
    Parse(#[from] calamine::Error),

    /// JSONの処理中に発生したエラー
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// サンプルワークブックの書き込みエラー
    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に無効な設定が検出された場合に発生します。
    ///
    /// ```rust,no_run
    /// use xlsxcatalog::{CatalogError, ConverterBuilder};
    ///
    /// match ConverterBuilder::new().with_max_input_size(0).build() {
    ///     Err(CatalogError::Config(msg)) => println!("設定エラー: {}", msg),
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// ワークブックの構造が想定外
    ///
    /// ワークシートが存在しない、ヘッダー行がないなどの場合に発生します。
    #[error("Malformed workbook: {0}")]
    Malformed(String),

    /// セキュリティ制限に違反したエラー
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}
