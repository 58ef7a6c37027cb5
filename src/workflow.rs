//! Single image workflow
//!
//! decode → detect → crop → encode → write, for one file.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use image::{ColorType, DynamicImage, ImageFormat, ImageReader};
use tracing::{debug, info};

use crate::border::{
    crop_to_content, BorderDetector, BoundingRect, CropError, CropOptions, Result,
};
use crate::naming::default_output_path;

/// Result of cropping one image
#[derive(Debug, Clone)]
pub struct CropReport {
    /// Source image
    pub input_path: PathBuf,
    /// Where the result was written
    pub output_path: PathBuf,
    /// Source size (width, height)
    pub original_size: (u32, u32),
    /// Output size (width, height)
    pub cropped_size: (u32, u32),
    /// Detected content rectangle, `None` if the image was all border
    pub content_rect: Option<BoundingRect>,
}

impl CropReport {
    /// Whether any content was detected
    pub fn content_found(&self) -> bool {
        self.content_rect.is_some()
    }

    /// Whether the output is smaller than the input
    pub fn was_cropped(&self) -> bool {
        self.original_size != self.cropped_size
    }
}

/// Crop the borders of the image at `input` and write the result.
///
/// When `output` is `None` the result goes next to the input with
/// `options.suffix` inserted before the extension. Existing files are
/// overwritten.
pub fn process_image(
    input: &Path,
    output: Option<&Path>,
    options: &CropOptions,
) -> Result<CropReport> {
    if !input.exists() {
        return Err(CropError::InputNotFound(input.to_path_buf()));
    }

    info!("Processing {}", input.display());

    let (img, input_format) = decode(input)?;
    let original_size = (img.width(), img.height());

    let content_rect = BorderDetector::detect(&img, options.threshold, options.mode);
    debug!(
        "{}: threshold={} mode={} rect={:?}",
        input.display(),
        options.threshold,
        options.mode,
        content_rect
    );

    let cropped = crop_to_content(img, content_rect);
    let cropped_size = (cropped.width(), cropped.height());

    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input, &options.suffix),
    };

    encode(&cropped, &output_path, input_format)?;
    info!("Saved cropped image to {}", output_path.display());

    Ok(CropReport {
        input_path: input.to_path_buf(),
        output_path,
        original_size,
        cropped_size,
        content_rect,
    })
}

/// Decode an image, guessing the format from its content first
fn decode(path: &Path) -> Result<(DynamicImage, Option<ImageFormat>)> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader.format();
    let img = reader.decode().map_err(|source| CropError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((img, format))
}

/// Encode by output extension, falling back to the source format
fn encode(img: &DynamicImage, path: &Path, fallback: Option<ImageFormat>) -> Result<()> {
    let format = match (ImageFormat::from_path(path), fallback) {
        (Ok(format), _) => format,
        (Err(_), Some(format)) => format,
        (Err(source), None) => {
            return Err(CropError::Encode {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let img = prepare_for_format(img, format);
    img.save_with_format(path, format).map_err(|source| CropError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Convert to a color type the target encoder accepts, if it does not take
/// the image as is
fn prepare_for_format(img: &DynamicImage, format: ImageFormat) -> Cow<'_, DynamicImage> {
    let accepted = encodable_colors(format);
    let current = img.color();
    if accepted.contains(&current) {
        return Cow::Borrowed(img);
    }

    match conversion_order(current)
        .iter()
        .copied()
        .find(|color| accepted.contains(color))
    {
        Some(target) => {
            debug!("Converting {:?} to {:?} for {:?} output", current, target, format);
            Cow::Owned(convert_color(img, target))
        }
        None => Cow::Borrowed(img),
    }
}

/// Color types each encoder writes
fn encodable_colors(format: ImageFormat) -> &'static [ColorType] {
    use ColorType::*;
    match format {
        ImageFormat::Jpeg => &[L8, Rgb8],
        ImageFormat::Gif | ImageFormat::Qoi => &[Rgb8, Rgba8],
        ImageFormat::Ico => &[Rgba8],
        ImageFormat::Bmp | ImageFormat::Tga | ImageFormat::WebP => &[L8, La8, Rgb8, Rgba8],
        ImageFormat::Png => &[L8, La8, Rgb8, Rgba8, L16, La16, Rgb16, Rgba16],
        ImageFormat::Tiff => &[L8, L16, Rgb8, Rgb16, Rgba8, Rgba16],
        ImageFormat::Pnm => &[L8, Rgb8],
        ImageFormat::Farbfeld => &[Rgba16],
        ImageFormat::OpenExr => &[Rgb32F, Rgba32F],
        ImageFormat::Hdr => &[Rgb32F],
        _ => &[Rgb8, Rgba8],
    }
}

/// Conversion targets, closest first. Gray stays gray and alpha stays
/// alpha where the encoder allows it; 8-bit is preferred over wider samples.
fn conversion_order(color: ColorType) -> &'static [ColorType] {
    use ColorType::*;
    match (color.has_color(), color.has_alpha()) {
        (false, false) => &[L8, Rgb8, Rgba8, L16, Rgb16, Rgba16, Rgb32F, Rgba32F],
        (false, true) => &[La8, Rgba8, Rgb8, La16, Rgba16, Rgba32F, Rgb32F],
        (true, false) => &[Rgb8, Rgba8, L8, Rgb16, Rgba16, Rgb32F, Rgba32F],
        (true, true) => &[Rgba8, Rgb8, Rgba16, Rgba32F, Rgb32F],
    }
}

fn convert_color(img: &DynamicImage, target: ColorType) -> DynamicImage {
    match target {
        ColorType::L8 => DynamicImage::ImageLuma8(img.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(img.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(img.to_rgb8()),
        ColorType::L16 => DynamicImage::ImageLuma16(img.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(img.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(img.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(img.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(img.to_rgb32f()),
        ColorType::Rgba32F => DynamicImage::ImageRgba32F(img.to_rgba32f()),
        _ => DynamicImage::ImageRgba8(img.to_rgba8()),
    }
}
