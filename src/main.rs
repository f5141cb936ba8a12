//! xlsxcatalog CLI
//!
//! 単技・Call本のワークブックをJSONに変換するコマンドラインツール。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use xlsxcatalog::{
    create_sample_workbooks, validate_output, CatalogError, ConversionOutcome, ConverterBuilder,
    DEFAULT_DATA_DIR,
};

#[derive(Parser)]
#[command(name = "xlsxcatalog")]
#[command(about = "Convert single-skill and call-book workbooks into site JSON", long_about = None)]
struct Cli {
    /// Data directory containing excel/ and json/
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Write sample workbooks when no source workbook exists
    #[arg(long)]
    create_samples: bool,

    /// Skip re-reading the written JSON files
    #[arg(long)]
    no_validate: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            handle_error(e);
            ExitCode::FAILURE
        }
    }
}

/// 変換を実行し、すべてのデータセットが出力ファイルを得られたかを返す
fn run(cli: &Cli) -> Result<bool, CatalogError> {
    let converter = ConverterBuilder::new()
        .with_data_dir(cli.data_dir.clone())
        .build()?;

    if converter.available_sources().is_empty() {
        if cli.create_samples {
            let created = create_sample_workbooks(converter.data_dir())?;
            log::info!("Created {} sample workbook(s)", created.len());
        } else {
            log::warn!(
                "No source workbooks under {}; run with --create-samples to generate examples",
                converter.data_dir().join("excel").display()
            );
        }
    }

    let mut all_written = true;
    for (dataset, result) in converter.convert_all() {
        let report = match result {
            Ok(report) => report,
            Err(e) => {
                log::error!("{}: failed to write output: {}", dataset, e);
                all_written = false;
                continue;
            }
        };

        match &report.outcome {
            ConversionOutcome::Converted { records } => {
                println!("{}: {} records -> {}", dataset, records, report.destination.display());
            }
            ConversionOutcome::SourceMissing => {
                println!("{}: source missing, wrote empty array", dataset);
            }
            ConversionOutcome::Fallback { reason } => {
                println!("{}: conversion failed ({}), wrote empty array", dataset, reason);
            }
        }

        if !cli.no_validate {
            match validate_output(&report.destination) {
                Ok(summary) => {
                    log::info!(
                        "{}: {} is a valid array of {} records",
                        dataset,
                        report.destination.display(),
                        summary.record_count
                    );
                    if let Some((filename, keywords)) = summary.first {
                        log::info!("  first: {} [{}]", filename, keywords.join(", "));
                    }
                }
                Err(e) => {
                    log::error!("{}: validation failed: {}", dataset, e);
                    all_written = false;
                }
            }
        }
    }

    Ok(all_written)
}

fn handle_error(error: CatalogError) {
    match error {
        CatalogError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the data directory exists and is writable.");
        }
        CatalogError::Xlsx(xlsx_err) => {
            eprintln!("Sample Workbook Error: {}", xlsx_err);
        }
        CatalogError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
        }
        other => {
            eprintln!("Error: {}", other);
        }
    }
}
