//! Batch folder processing
//!
//! Runs the single image workflow over every supported image in a folder.
//! A failing file is logged and recorded, and the batch moves on.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::border::{CropError, CropOptions, Result};
use crate::naming::output_path_in;
use crate::progress::BatchProgress;
use crate::workflow::{process_image, CropReport};

// ============================================================
// Constants
// ============================================================

/// Extensions picked up in batch mode (compared case-insensitively)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tiff"];

/// Output folder created under the input folder when none is given
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "cropped";

// ============================================================
// Types
// ============================================================

/// A file the batch could not process
#[derive(Debug)]
pub struct BatchFailure {
    /// File that failed
    pub path: PathBuf,
    /// Why it failed
    pub error: CropError,
}

/// Outcome of one batch run
#[derive(Debug)]
pub struct BatchReport {
    /// Folder that was scanned
    pub input_dir: PathBuf,
    /// Folder results were written to
    pub output_dir: PathBuf,
    /// Files written
    pub processed: Vec<CropReport>,
    /// Files that failed
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Number of files attempted
    pub fn total(&self) -> usize {
        self.processed.len() + self.failures.len()
    }

    /// Number of files written
    pub fn succeeded(&self) -> usize {
        self.processed.len()
    }

    /// Number of files that failed
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Files written unchanged because no content was detected
    pub fn no_content(&self) -> usize {
        self.processed.iter().filter(|r| !r.content_found()).count()
    }

    /// Whether every file was processed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

// ============================================================
// Batch Runner
// ============================================================

/// Sequential folder processor
pub struct BatchRunner;

impl BatchRunner {
    /// Process every supported image directly inside `input_dir`.
    ///
    /// Output goes to `output_dir`, or `input_dir/cropped` when `None`. Only a
    /// missing or unreadable root folder aborts the run.
    pub fn run(
        input_dir: &Path,
        output_dir: Option<&Path>,
        options: &CropOptions,
    ) -> Result<BatchReport> {
        Self::run_with_progress(input_dir, output_dir, options, &BatchProgress::hidden())
    }

    /// Same as [`BatchRunner::run`], reporting progress per file
    pub fn run_with_progress(
        input_dir: &Path,
        output_dir: Option<&Path>,
        options: &CropOptions,
        progress: &BatchProgress,
    ) -> Result<BatchReport> {
        let images = Self::collect_images(input_dir)?;

        let output_dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => Self::default_output_dir(input_dir),
        };
        std::fs::create_dir_all(&output_dir)?;

        info!(
            "Found {} image(s) in {}, writing to {}",
            images.len(),
            input_dir.display(),
            output_dir.display()
        );

        let mut report = BatchReport {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.clone(),
            processed: Vec::with_capacity(images.len()),
            failures: Vec::new(),
        };

        progress.start(images.len());
        for path in images {
            let output_path = output_path_in(&output_dir, &path, &options.suffix);
            progress.set_current(&path);

            match process_image(&path, Some(&output_path), options) {
                Ok(result) => report.processed.push(result),
                Err(e) => {
                    error!("Failed to process {}: {}", display_name(&path), e);
                    report.failures.push(BatchFailure { path, error: e });
                }
            }
            progress.advance();
        }
        progress.finish();

        Ok(report)
    }

    /// Supported image files directly inside `dir`, sorted by path
    pub fn collect_images(dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.exists() {
            return Err(CropError::InputNotFound(dir.to_path_buf()));
        }
        if !dir.is_dir() {
            return Err(CropError::NotADirectory(dir.to_path_buf()));
        }

        let mut images = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_supported_image(&path) {
                images.push(path);
            }
        }
        images.sort();

        Ok(images)
    }

    /// Output folder used when none is given
    pub fn default_output_dir(input_dir: &Path) -> PathBuf {
        input_dir.join(DEFAULT_OUTPUT_DIR_NAME)
    }
}

/// Whether `path` has one of the batch extensions
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn write_bordered_png(path: &Path) {
        GrayImage::from_fn(10, 10, |x, y| {
            if (2..=5).contains(&y) && (3..=7).contains(&x) {
                Luma([0])
            } else {
                Luma([255])
            }
        })
        .save(path)
        .unwrap();
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image(Path::new("a.jpg")));
        assert!(is_supported_image(Path::new("a.JPEG")));
        assert!(is_supported_image(Path::new("dir/a.Png")));
        assert!(is_supported_image(Path::new("a.bmp")));
        assert!(is_supported_image(Path::new("a.gif")));
        assert!(is_supported_image(Path::new("a.TIFF")));

        assert!(!is_supported_image(Path::new("a.tif")));
        assert!(!is_supported_image(Path::new("a.webp")));
        assert!(!is_supported_image(Path::new("a.txt")));
        assert!(!is_supported_image(Path::new("png")));
        assert!(!is_supported_image(Path::new("a.png.bak")));
    }

    #[test]
    fn test_missing_root_folder() {
        let result = BatchRunner::run(
            Path::new("/nonexistent/folder"),
            None,
            &CropOptions::default(),
        );
        assert!(matches!(result, Err(CropError::InputNotFound(_))));
    }

    #[test]
    fn test_root_is_a_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("scan.png");
        write_bordered_png(&file);

        let result = BatchRunner::run(&file, None, &CropOptions::default());
        assert!(matches!(result, Err(CropError::NotADirectory(_))));
    }

    #[test]
    fn test_collect_images_filters_and_sorts() {
        let temp_dir = tempfile::tempdir().unwrap();
        for name in ["c.png", "a.JPG", "b.txt", "d.tiff", "e.webp"] {
            std::fs::write(temp_dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(temp_dir.path().join("sub.png")).unwrap();

        let images = BatchRunner::collect_images(temp_dir.path()).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.JPG", "c.png", "d.tiff"]);
    }

    #[test]
    fn test_default_output_folder_is_created() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_bordered_png(&temp_dir.path().join("one.png"));

        let report = BatchRunner::run(temp_dir.path(), None, &CropOptions::default()).unwrap();

        let expected_dir = temp_dir.path().join("cropped");
        assert_eq!(report.output_dir, expected_dir);
        assert!(expected_dir.join("one_cropped.png").exists());
        assert!(report.is_complete());
    }

    #[test]
    fn test_nested_output_folder_is_created() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_bordered_png(&temp_dir.path().join("one.png"));
        let out = temp_dir.path().join("x/y/z");

        let report =
            BatchRunner::run(temp_dir.path(), Some(&out), &CropOptions::default()).unwrap();

        assert_eq!(report.succeeded(), 1);
        assert!(out.join("one_cropped.png").exists());
    }

    #[test]
    fn test_batch_isolates_failures() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path();
        write_bordered_png(&input.join("a.png"));
        write_bordered_png(&input.join("b.png"));
        RgbImage::from_pixel(6, 6, Rgb([255, 255, 255]))
            .save(input.join("c.bmp"))
            .unwrap();
        std::fs::write(input.join("broken.jpg"), b"definitely not a jpeg").unwrap();
        let out = temp_dir.path().join("out");

        let report = BatchRunner::run(input, Some(&out), &CropOptions::default()).unwrap();

        assert_eq!(report.total(), 4);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.no_content(), 1);
        assert!(!report.is_complete());

        assert_eq!(report.failures[0].path, input.join("broken.jpg"));
        assert!(matches!(report.failures[0].error, CropError::Decode { .. }));

        assert!(out.join("a_cropped.png").exists());
        assert!(out.join("b_cropped.png").exists());
        assert!(out.join("c_cropped.bmp").exists());
        assert!(!out.join("broken_cropped.jpg").exists());

        let a = image::open(out.join("a_cropped.png")).unwrap();
        assert_eq!((a.width(), a.height()), (5, 4));
    }

    #[test]
    fn test_batch_isolates_write_failures() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("in");
        std::fs::create_dir(&input).unwrap();
        write_bordered_png(&input.join("a.png"));
        write_bordered_png(&input.join("b.png"));
        RgbImage::from_pixel(6, 6, Rgb([255, 255, 255]))
            .save(input.join("c.bmp"))
            .unwrap();

        // A directory squatting on a's output path makes that write fail
        let out = temp_dir.path().join("out");
        std::fs::create_dir_all(out.join("a_cropped.png")).unwrap();

        let report = BatchRunner::run(&input, Some(&out), &CropOptions::default()).unwrap();

        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures[0].path, input.join("a.png"));
        assert!(matches!(report.failures[0].error, CropError::Encode { .. }));

        assert!(out.join("a_cropped.png").is_dir());
        assert!(out.join("b_cropped.png").is_file());
        assert!(out.join("c_cropped.bmp").is_file());
    }

    #[test]
    fn test_empty_folder() {
        let temp_dir = tempfile::tempdir().unwrap();
        let report = BatchRunner::run(temp_dir.path(), None, &CropOptions::default()).unwrap();
        assert_eq!(report.total(), 0);
        assert!(report.is_complete());
    }

    #[test]
    fn test_rerun_ignores_output_subfolder() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_bordered_png(&temp_dir.path().join("one.png"));

        BatchRunner::run(temp_dir.path(), None, &CropOptions::default()).unwrap();
        let report = BatchRunner::run(temp_dir.path(), None, &CropOptions::default()).unwrap();

        assert_eq!(report.total(), 1);
    }
}
