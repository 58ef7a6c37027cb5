//! Border Detection & Cropping module
//!
//! Detects uniform white or black borders around an image and crops them away.
//!
//! # Algorithm
//!
//! 1. Project each pixel to a brightness value (mean of RGB, or luma)
//! 2. Classify pixels as border (brighter than the threshold in white mode,
//!    darker in black mode) or content
//! 3. Keep the first/last row and column that hold any content pixel
//!
//! # Example
//!
//! ```rust,no_run
//! use bordercrop::{crop_to_content, BorderDetector, BorderMode};
//!
//! let img = image::open("scan.png").unwrap();
//! let rect = BorderDetector::detect(&img, 240, BorderMode::White);
//! let cropped = crop_to_content(img, rect);
//! println!("Cropped to {}x{}", cropped.width(), cropped.height());
//! ```

// Submodules
mod crop;
mod detect;
mod types;

// Re-export public API
pub use crop::crop_to_content;
pub use detect::BorderDetector;
pub use types::{
    BorderMode, BoundingRect, CropError, CropOptions, CropOptionsBuilder, Result,
    DEFAULT_SUFFIX, DEFAULT_THRESHOLD,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_options() {
        let opts = CropOptions::default();

        assert_eq!(opts.threshold, 240);
        assert_eq!(opts.mode, BorderMode::White);
        assert_eq!(opts.suffix, "_cropped");
    }

    #[test]
    fn test_builder_pattern() {
        let options = CropOptions::builder()
            .threshold(10)
            .mode(BorderMode::Black)
            .suffix("_trim")
            .build();

        assert_eq!(options.threshold, 10);
        assert_eq!(options.mode, BorderMode::Black);
        assert_eq!(options.suffix, "_trim");
    }

    #[test]
    fn test_black_preset() {
        let options = CropOptions::black(15);
        assert_eq!(options.threshold, 15);
        assert_eq!(options.mode, BorderMode::Black);
        assert_eq!(options.suffix, DEFAULT_SUFFIX);
    }

    #[test]
    fn test_border_mode_from_flag() {
        assert_eq!(BorderMode::from_black_flag(false), BorderMode::White);
        assert_eq!(BorderMode::from_black_flag(true), BorderMode::Black);
        assert_eq!(BorderMode::default(), BorderMode::White);
        assert_eq!(BorderMode::Black.to_string(), "black");
    }

    #[test]
    fn test_bounding_rect_dimensions() {
        let rect = BoundingRect {
            row_min: 2,
            row_max: 5,
            col_min: 3,
            col_max: 7,
        };

        assert_eq!(rect.width(), 5);
        assert_eq!(rect.height(), 4);
        assert!(!rect.is_full_extent(10, 10));
        assert!(!rect.is_full_extent(8, 6));
        assert!(BoundingRect::full(8, 6).is_full_extent(8, 6));
    }

    #[test]
    fn test_error_display_messages() {
        let err = CropError::InputNotFound(PathBuf::from("/test/missing.png"));
        assert!(err.to_string().contains("not found"));

        let err = CropError::NotADirectory(PathBuf::from("/test/file.png"));
        assert!(err.to_string().contains("Not a directory"));

        let err: CropError = std::io::Error::other("disk full").into();
        assert!(err.to_string().contains("disk full"));
    }
}
