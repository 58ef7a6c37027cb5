//! Command-line interface definitions

use std::path::PathBuf;

use clap::Parser;

use crate::config::CliOverrides;

/// Remove uniform white or black borders from images
#[derive(Debug, Parser)]
#[command(name = "bordercrop", version, about, long_about = None)]
pub struct Cli {
    /// Input image or folder
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output image or folder [default: <input>_cropped.<ext> or <folder>/cropped]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Brightness threshold 0-255 [default: 240]
    #[arg(short, long)]
    pub threshold: Option<u8>,

    /// Remove black borders instead of white ones
    #[arg(long)]
    pub black: bool,

    /// Remove white borders, overriding `black = true` from a config file
    #[arg(long, conflicts_with = "black")]
    pub white: bool,

    /// Suffix inserted before the extension of output files [default: _cropped]
    #[arg(long)]
    pub suffix: Option<String>,

    /// Config file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show a progress bar in folder mode
    #[arg(long)]
    pub progress: bool,

    /// Print what would be done without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Values the user set explicitly
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            threshold: self.threshold,
            black: self.border_override(),
            suffix: self.suffix.clone(),
        }
    }

    /// Border color forced by `--black` / `--white`, if any
    fn border_override(&self) -> Option<bool> {
        match (self.black, self.white) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Log level implied by `-q` / `-v`
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::WARN;
        }
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
