//! Crop an image to a detected content rectangle

use image::{DynamicImage, GenericImageView};
use tracing::{debug, warn};

use super::types::BoundingRect;

/// Crop `image` to `rect`.
///
/// `None` means no content was found: the image is returned unchanged and a
/// warning is logged. A rect covering the whole image is also a no-op.
pub fn crop_to_content(image: DynamicImage, rect: Option<BoundingRect>) -> DynamicImage {
    let (width, height) = image.dimensions();

    let Some(rect) = rect else {
        warn!("No content detected, original image returned unchanged");
        return image;
    };

    if rect.is_full_extent(width, height) {
        debug!("Content spans the full {}x{} image, nothing to crop", width, height);
        return image;
    }

    debug!(
        "Cropping {}x{} to {}x{} at ({}, {})",
        width,
        height,
        rect.width(),
        rect.height(),
        rect.col_min,
        rect.row_min
    );
    image.crop_imm(rect.col_min, rect.row_min, rect.width(), rect.height())
}
