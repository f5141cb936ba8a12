//! Security Module
//!
//! 入力ファイルに対するセキュリティ制限を提供するモジュール。

use crate::error::CatalogError;

/// 入力ファイルの最大サイズのデフォルト値
/// 100MB (104_857_600 bytes)
pub(crate) const DEFAULT_MAX_INPUT_FILE_SIZE: u64 = 104_857_600;

/// セキュリティ設定
///
/// ファイル処理時のセキュリティ制限を定義します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: DEFAULT_MAX_INPUT_FILE_SIZE,
        }
    }
}

impl SecurityConfig {
    /// 入力サイズが上限以内かを検証
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 上限以内の場合
    /// * `Err(CatalogError::SecurityViolation)` - 上限を超える場合
    pub fn check_input_size(&self, size: u64) -> Result<(), CatalogError> {
        if size > self.max_input_file_size {
            return Err(CatalogError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                size, self.max_input_file_size
            )));
        }
        Ok(())
    }
}
