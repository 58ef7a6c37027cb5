//! bordercrop - remove uniform white or black borders from images
//!
//! Works on a single image or on every supported image in a folder.
//!
//! # Example
//!
//! ```rust,no_run
//! use bordercrop::{process_image, BatchRunner, CropOptions};
//! use std::path::Path;
//!
//! let options = CropOptions::builder().threshold(230).build();
//!
//! // One file, written next to the input as scan_cropped.png
//! let report = process_image(Path::new("scan.png"), None, &options).unwrap();
//! println!("Saved {}", report.output_path.display());
//!
//! // A whole folder, written to scans/cropped/
//! let batch = BatchRunner::run(Path::new("scans"), None, &options).unwrap();
//! println!("{} ok, {} failed", batch.succeeded(), batch.failed());
//! ```

pub mod batch;
pub mod border;
pub mod cli;
pub mod config;
pub mod naming;
pub mod progress;
pub mod workflow;

// Re-export public API
pub use batch::{
    is_supported_image, BatchFailure, BatchReport, BatchRunner, DEFAULT_OUTPUT_DIR_NAME,
    SUPPORTED_EXTENSIONS,
};
pub use border::{
    crop_to_content, BorderDetector, BorderMode, BoundingRect, CropError, CropOptions,
    CropOptionsBuilder, DEFAULT_SUFFIX, DEFAULT_THRESHOLD,
};
pub use cli::Cli;
pub use config::{CliOverrides, Config, ConfigError};
pub use naming::{default_output_path, output_path_in, suffixed_file_name};
pub use progress::{print_summary, BatchProgress};
pub use workflow::{process_image, CropReport};

/// Process exit codes
pub mod exit_codes {
    /// Completed (a batch with per-file failures still counts)
    pub const SUCCESS: i32 = 0;
    /// Any fatal error not covered below
    pub const GENERAL_ERROR: i32 = 1;
    /// Invalid command-line arguments
    pub const INVALID_ARGS: i32 = 2;
    /// Input file or folder does not exist
    pub const INPUT_NOT_FOUND: i32 = 3;
    /// Config file could not be loaded
    pub const CONFIG_ERROR: i32 = 4;
}
