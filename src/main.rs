//! bordercrop - remove uniform white or black borders from images
//!
//! CLI entry point

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use bordercrop::{
    exit_codes, print_summary, process_image, BatchProgress, BatchRunner, Cli, Config,
    ConfigError, CropError, CropOptions,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    std::process::exit(match run(&cli) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for(&e)
        }
    });
}

fn init_logging(level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code_for(error: &anyhow::Error) -> i32 {
    if let Some(e) = error.downcast_ref::<CropError>() {
        return match e {
            CropError::InputNotFound(_) | CropError::NotADirectory(_) => {
                exit_codes::INPUT_NOT_FOUND
            }
            _ => exit_codes::GENERAL_ERROR,
        };
    }
    if error.downcast_ref::<ConfigError>().is_some() {
        return exit_codes::CONFIG_ERROR;
    }
    exit_codes::GENERAL_ERROR
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let options = config.merge_with_cli(&cli.overrides());

    if !cli.input.exists() {
        return Err(CropError::InputNotFound(cli.input.clone()).into());
    }

    if cli.input.is_dir() {
        let output_dir = cli
            .output
            .clone()
            .unwrap_or_else(|| cli.input.join(&config.output_dir_name));
        run_batch(cli, &output_dir, &options)
    } else {
        run_single(cli, &options)
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(Config::load()),
    }
}

// ============ Single Image ============

fn run_single(cli: &Cli, options: &CropOptions) -> Result<()> {
    if cli.dry_run {
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| bordercrop::default_output_path(&cli.input, &options.suffix));
        print_execution_plan(&cli.input, &output, options, &[cli.input.clone()]);
        return Ok(());
    }

    process_image(&cli.input, cli.output.as_deref(), options)
        .with_context(|| format!("Failed to crop {}", cli.input.display()))?;

    Ok(())
}

// ============ Folder ============

fn run_batch(cli: &Cli, output_dir: &Path, options: &CropOptions) -> Result<()> {
    if cli.dry_run {
        let images = BatchRunner::collect_images(&cli.input)?;
        print_execution_plan(&cli.input, output_dir, options, &images);
        return Ok(());
    }

    let progress = BatchProgress::new(cli.progress);
    let report = BatchRunner::run_with_progress(&cli.input, Some(output_dir), options, &progress)?;

    if !cli.quiet {
        print_summary(&report);
    }
    if !report.is_complete() {
        warn!(
            "{} of {} file(s) could not be processed",
            report.failed(),
            report.total()
        );
    }

    Ok(())
}

/// Print execution plan for dry-run mode
fn print_execution_plan(input: &Path, output: &Path, options: &CropOptions, files: &[PathBuf]) {
    println!("=== Dry Run - Execution Plan ===");
    println!();
    println!("Input:     {}", input.display());
    println!("Output:    {}", output.display());
    println!("Border:    {}", options.mode);
    println!("Threshold: {}", options.threshold);
    println!("Suffix:    {}", options.suffix);
    println!();
    println!("Files to process: {}", files.len());
    for (i, file) in files.iter().enumerate() {
        println!("  {}. {}", i + 1, file.display());
    }
}
