//! Progress display for batch runs.
//!
//! An optional indicatif bar while files are processed, and a plain text
//! summary once the batch is done.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use crate::batch::BatchReport;

/// Template for the batch progress bar
const PROGRESS_TEMPLATE: &str = "{spinner} [{bar:40}] {pos}/{len} {wide_msg}";

/// Progress bar characters
const PROGRESS_CHARS: &str = "=>-";

/// Width of summary separators
const SUMMARY_WIDTH: usize = 60;

/// Batch progress reporter
#[derive(Debug)]
pub struct BatchProgress {
    bar: Option<ProgressBar>,
}

impl BatchProgress {
    /// Reporter that draws a bar on stderr
    pub fn visible() -> Self {
        Self {
            bar: Some(ProgressBar::new(0)),
        }
    }

    /// Reporter that draws nothing
    pub fn hidden() -> Self {
        Self { bar: None }
    }

    /// Create from a flag
    pub fn new(show: bool) -> Self {
        if show {
            Self::visible()
        } else {
            Self::hidden()
        }
    }

    /// Whether a bar is drawn
    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    /// Begin a run over `total` files
    pub fn start(&self, total: usize) {
        if let Some(bar) = &self.bar {
            bar.set_length(total as u64);
            bar.set_position(0);
            let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars(PROGRESS_CHARS);
            bar.set_style(style);
        }
    }

    /// Show the file currently being processed
    pub fn set_current(&self, path: &Path) {
        if let Some(bar) = &self.bar {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            bar.set_message(name);
        }
    }

    /// One file done
    pub fn advance(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Clear the bar
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Current position, 0 when hidden
    pub fn position(&self) -> u64 {
        self.bar.as_ref().map_or(0, ProgressBar::position)
    }
}

/// Build the summary lines for a finished batch
pub fn summary_lines(report: &BatchReport) -> Vec<String> {
    let cropped = report.processed.iter().filter(|r| r.was_cropped()).count();
    let unchanged = report.succeeded() - cropped;

    let mut lines = vec![
        "=".repeat(SUMMARY_WIDTH),
        "Batch Summary".to_string(),
        "=".repeat(SUMMARY_WIDTH),
        format!("  Input folder:  {}", report.input_dir.display()),
        format!("  Output folder: {}", report.output_dir.display()),
        format!("  Total files:   {}", report.total()),
        format!("  Cropped:       {}", cropped),
        format!("  Unchanged:     {}", unchanged),
        format!("  No content:    {}", report.no_content()),
        format!("  Errors:        {}", report.failed()),
    ];
    for failure in &report.failures {
        lines.push(format!("    {}: {}", failure.path.display(), failure.error));
    }
    lines.push("=".repeat(SUMMARY_WIDTH));
    lines
}

/// Print the summary for a finished batch
pub fn print_summary(report: &BatchReport) {
    println!();
    for line in summary_lines(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchFailure;
    use crate::border::{BoundingRect, CropError};
    use crate::workflow::CropReport;
    use std::path::PathBuf;

    fn report(original: (u32, u32), cropped: (u32, u32), rect: Option<BoundingRect>) -> CropReport {
        CropReport {
            input_path: PathBuf::from("/in/a.png"),
            output_path: PathBuf::from("/out/a_cropped.png"),
            original_size: original,
            cropped_size: cropped,
            content_rect: rect,
        }
    }

    #[test]
    fn test_hidden_progress_is_inert() {
        let progress = BatchProgress::new(false);
        assert!(!progress.is_visible());
        progress.start(3);
        progress.set_current(Path::new("a.png"));
        progress.advance();
        progress.finish();
        assert_eq!(progress.position(), 0);
    }

    #[test]
    fn test_visible_progress_counts() {
        let progress = BatchProgress::visible();
        assert!(progress.is_visible());
        progress.start(2);
        progress.advance();
        progress.advance();
        assert_eq!(progress.position(), 2);
        progress.finish();
    }

    #[test]
    fn test_summary_counts() {
        let batch = BatchReport {
            input_dir: PathBuf::from("/in"),
            output_dir: PathBuf::from("/out"),
            processed: vec![
                report(
                    (10, 10),
                    (5, 4),
                    Some(BoundingRect {
                        row_min: 2,
                        row_max: 5,
                        col_min: 3,
                        col_max: 7,
                    }),
                ),
                report((10, 10), (10, 10), None),
            ],
            failures: vec![BatchFailure {
                path: PathBuf::from("/in/broken.jpg"),
                error: CropError::InputNotFound(PathBuf::from("/in/broken.jpg")),
            }],
        };

        let lines = summary_lines(&batch);
        assert!(lines.iter().any(|l| l.contains("Total files:   3")));
        assert!(lines.iter().any(|l| l.contains("Cropped:       1")));
        assert!(lines.iter().any(|l| l.contains("Unchanged:     1")));
        assert!(lines.iter().any(|l| l.contains("No content:    1")));
        assert!(lines.iter().any(|l| l.contains("Errors:        1")));
        assert!(lines.iter().any(|l| l.contains("broken.jpg")));
    }
}
