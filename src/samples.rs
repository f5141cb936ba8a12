//! Sample Workbook Module
//!
//! 入力ワークブックがまだ用意されていない環境向けに、
//! 各データセットのサンプルワークブックを生成するモジュール。

use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::Dataset;
use crate::error::CatalogError;

/// データセットごとのサンプルデータ（ヘッダー行 + データ行）
fn sample_rows(dataset: Dataset) -> (&'static [&'static str; 5], &'static [[&'static str; 5]; 3]) {
    match dataset {
        Dataset::SingleSkill => (
            &["filename", "keywords", "text_content", "category", "difficulty"],
            &[
                [
                    "single_skill_001.jpg",
                    "フライングゲット,コール",
                    "フライングゲットの基本コール説明です。",
                    "AKB48",
                    "初級",
                ],
                [
                    "single_skill_002.jpg",
                    "ヘビーローテーション,振付",
                    "ヘビーローテーションの振付とコールのタイミング。",
                    "AKB48",
                    "中級",
                ],
                [
                    "single_skill_003.jpg",
                    "桜の木になろう,応援",
                    "桜の木になろうの応援方法とポイント。",
                    "AKB48",
                    "上級",
                ],
            ],
        ),
        Dataset::CallBook => (
            &["filename", "keywords", "text_content", "song_name", "event_type"],
            &[
                [
                    "call_book_001.jpg",
                    "握手会,基本",
                    "握手会での基本的なマナーとコール。",
                    "桜の花びら",
                    "握手会",
                ],
                [
                    "call_book_002.jpg",
                    "ライブ,応援",
                    "ライブでの応援の流れと注意点。",
                    "大声ダイヤモンド",
                    "ライブ",
                ],
                [
                    "call_book_003.jpg",
                    "劇場,コール",
                    "劇場公演でのコールのタイミング。",
                    "Everyday、カチューシャ",
                    "劇場",
                ],
            ],
        ),
    }
}

/// サンプルワークブックを組み立てる
fn build_sample(dataset: Dataset) -> Result<Workbook, CatalogError> {
    let (header, rows) = sample_rows(dataset);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in header.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }
    for (row, values) in rows.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, *value)?;
        }
    }

    Ok(workbook)
}

/// サンプルワークブックをメモリ上に生成する
pub fn sample_workbook(dataset: Dataset) -> Result<Vec<u8>, CatalogError> {
    Ok(build_sample(dataset)?.save_to_buffer()?)
}

/// すべてのデータセットのサンプルワークブックを`<data_dir>/excel/`に書き出す
///
/// 既存のワークブックは上書きしません。
///
/// # 戻り値
///
/// * `Ok(Vec<PathBuf>)` - 新たに書き出したファイルのパス
/// * `Err(CatalogError)` - ディレクトリ作成または書き込みに失敗した場合
pub fn create_sample_workbooks(data_dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    let mut created = Vec::new();

    for dataset in Dataset::ALL {
        let path = dataset.source_path(data_dir);
        if path.exists() {
            log::info!("Keeping existing workbook: {}", path.display());
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        build_sample(dataset)?.save(&path)?;
        log::info!("Created sample workbook: {}", path.display());
        created.push(path);
    }

    Ok(created)
}
