//! Border detection
//!
//! Projects every pixel to a brightness value, classifies it as border or
//! content, and tracks the first/last content-bearing row and column in one
//! pass over the pixel data.

use image::{DynamicImage, ImageBuffer, Pixel};

use super::types::{BorderMode, BoundingRect};

/// Threshold-based border detector
pub struct BorderDetector;

impl BorderDetector {
    /// Detect the content rectangle of a decoded image.
    ///
    /// Returns `None` when every pixel is classified as border.
    pub fn detect(image: &DynamicImage, threshold: u8, mode: BorderMode) -> Option<BoundingRect> {
        match image {
            DynamicImage::ImageLuma8(buf) => Self::detect_buffer(buf, threshold, mode),
            DynamicImage::ImageLumaA8(buf) => Self::detect_buffer(buf, threshold, mode),
            DynamicImage::ImageRgb8(buf) => Self::detect_buffer(buf, threshold, mode),
            DynamicImage::ImageRgba8(buf) => Self::detect_buffer(buf, threshold, mode),
            // Wider sample types are brought onto the 0-255 scale first
            other => Self::detect_buffer(&other.to_rgba8(), threshold, mode),
        }
    }

    /// Detect the content rectangle of an 8-bit image buffer
    pub fn detect_buffer<P>(
        buffer: &ImageBuffer<P, Vec<u8>>,
        threshold: u8,
        mode: BorderMode,
    ) -> Option<BoundingRect>
    where
        P: Pixel<Subpixel = u8>,
    {
        let (width, height) = buffer.dimensions();
        if width == 0 || height == 0 {
            return None;
        }

        let mut row_min: Option<u32> = None;
        let mut row_max = 0u32;
        let mut column_has_content = vec![false; width as usize];

        for (y, row) in buffer.rows().enumerate() {
            let mut row_has_content = false;
            for (x, pixel) in row.enumerate() {
                if !is_border(pixel.channels(), threshold, mode) {
                    row_has_content = true;
                    column_has_content[x] = true;
                }
            }
            if row_has_content {
                let y = y as u32;
                row_min.get_or_insert(y);
                row_max = y;
            }
        }

        let row_min = row_min?;
        let col_min = column_has_content.iter().position(|&c| c)? as u32;
        let col_max = column_has_content.iter().rposition(|&c| c)? as u32;

        Some(BoundingRect {
            row_min,
            row_max,
            col_min,
            col_max,
        })
    }
}

/// Sum of the channels that make up a pixel's brightness, and the divisor
/// that turns it into a mean.
///
/// Three or more channels: the first three (alpha ignored). Fewer: luma only.
fn brightness_sum(channels: &[u8]) -> (u32, u32) {
    match channels {
        [r, g, b, ..] => (*r as u32 + *g as u32 + *b as u32, 3),
        [l, ..] => (*l as u32, 1),
        [] => (0, 1),
    }
}

/// Classify one pixel. `mean > t` is evaluated as `sum > t * n` so the
/// comparison stays exact.
fn is_border(channels: &[u8], threshold: u8, mode: BorderMode) -> bool {
    let (sum, count) = brightness_sum(channels);
    let limit = threshold as u32 * count;
    match mode {
        BorderMode::White => sum > limit,
        BorderMode::Black => sum < limit,
    }
}
