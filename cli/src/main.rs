//! sitrep CLI - situation-report table extraction tool

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use sitrep::ExtractOptions;

#[derive(Parser)]
#[command(name = "sitrep")]
#[command(version)]
#[command(about = "Extract situation-report tables to per-section CSV and JSON", long_about = None)]
struct Cli {
    /// Directory of layout dumps (one JSON file per report), or a single
    /// layout dump
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output root directory
    #[arg(short, long, value_name = "DIR", default_value = "parsed")]
    output: PathBuf,

    /// Header search band above each table, in points
    #[arg(long, value_name = "POINTS", default_value_t = 80.0)]
    header_band: f32,

    /// Cell alignment tolerance, in points
    #[arg(long, value_name = "POINTS", default_value_t = 5.0)]
    alignment_tolerance: f32,

    /// Maximum length of a mixed-case heading candidate
    #[arg(long, value_name = "CHARS", default_value_t = 100)]
    max_title_len: usize,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let options = ExtractOptions::new()
        .with_header_band(cli.header_band)
        .with_alignment_tolerance(cli.alignment_tolerance)
        .with_max_title_len(cli.max_title_len);

    match run(&cli, &options) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, options: &ExtractOptions) -> sitrep::Result<ExitCode> {
    if cli.input.is_file() {
        let processed = sitrep::process_file(&cli.input, &cli.output, options)?;
        println!(
            "{} {} ({} table(s)) -> {}",
            "processed".green().bold(),
            processed.event.event_name,
            processed.tables.len(),
            processed.output_dir.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let summary = sitrep::process_dir(&cli.input, &cli.output, options)?;

    for failure in &summary.failures {
        println!(
            "{} {}: {}",
            "failed".red().bold(),
            failure.document,
            failure.error
        );
    }
    println!(
        "{} {}/{} document(s)",
        "processed".green().bold(),
        summary.processed,
        summary.total
    );

    if summary.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
