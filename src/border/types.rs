//! Border module core types
//!
//! Contains the data structures shared by border detection, cropping and the
//! file-level workflows built on top of them.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================
// Constants
// ============================================================

/// Default brightness threshold (0-255)
pub const DEFAULT_THRESHOLD: u8 = 240;

/// Default suffix inserted before the extension of output files
pub const DEFAULT_SUFFIX: &str = "_cropped";

// ============================================================
// Error Types
// ============================================================

/// Border cropping error types
#[derive(Debug, Error)]
pub enum CropError {
    #[error("Input not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CropError>;

// ============================================================
// Core Data Structures
// ============================================================

/// Which kind of border is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Bright border: a pixel is border when its brightness is above the threshold
    #[default]
    White,
    /// Dark border: a pixel is border when its brightness is below the threshold
    Black,
}

impl BorderMode {
    /// Map the `--black` style flag onto a mode
    pub fn from_black_flag(black: bool) -> Self {
        if black {
            BorderMode::Black
        } else {
            BorderMode::White
        }
    }

    /// Get the lowercase name of the mode
    pub fn name(&self) -> &'static str {
        match self {
            BorderMode::White => "white",
            BorderMode::Black => "black",
        }
    }
}

impl std::fmt::Display for BorderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Smallest rectangle holding every content-bearing row and column.
///
/// All bounds are inclusive pixel indices, so a rect covering a single pixel
/// has `row_min == row_max` and `col_min == col_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingRect {
    pub row_min: u32,
    pub row_max: u32,
    pub col_min: u32,
    pub col_max: u32,
}

impl BoundingRect {
    /// Rect covering a whole `width` x `height` image
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            row_min: 0,
            row_max: height.saturating_sub(1),
            col_min: 0,
            col_max: width.saturating_sub(1),
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.col_max - self.col_min + 1
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.row_max - self.row_min + 1
    }

    /// Whether the rect spans the entire image
    pub fn is_full_extent(&self, width: u32, height: u32) -> bool {
        width > 0 && height > 0 && *self == Self::full(width, height)
    }
}

// ============================================================
// Options
// ============================================================

/// Options for one crop invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropOptions {
    /// Brightness threshold (0-255)
    pub threshold: u8,
    /// Border polarity
    pub mode: BorderMode,
    /// Suffix inserted before the extension of derived output names
    pub suffix: String,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            mode: BorderMode::White,
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl CropOptions {
    /// Create a new options builder
    pub fn builder() -> CropOptionsBuilder {
        CropOptionsBuilder::default()
    }

    /// Create options for black borders with the given threshold
    pub fn black(threshold: u8) -> Self {
        Self {
            threshold,
            mode: BorderMode::Black,
            ..Default::default()
        }
    }
}

/// Builder for CropOptions
#[derive(Debug, Default)]
pub struct CropOptionsBuilder {
    options: CropOptions,
}

impl CropOptionsBuilder {
    /// Set brightness threshold (0-255)
    #[must_use]
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.options.threshold = threshold;
        self
    }

    /// Set border mode
    #[must_use]
    pub fn mode(mut self, mode: BorderMode) -> Self {
        self.options.mode = mode;
        self
    }

    /// Set output suffix
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.options.suffix = suffix.into();
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> CropOptions {
        self.options
    }
}
