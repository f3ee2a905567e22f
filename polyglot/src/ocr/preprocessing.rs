use image::metadata::Orientation;
use image::{DynamicImage, GrayImage, ImageDecoder, ImageFormat, ImageReader, Luma};

use crate::error::{PolyglotError, Result};

pub const DEFAULT_CONTRAST_FACTOR: f32 = 2.0;

/// A decoded image together with the orientation recorded in its EXIF data.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub image: DynamicImage,
    pub orientation: Orientation,
}

impl SourceImage {
    pub fn upright(image: DynamicImage) -> Self {
        Self {
            image,
            orientation: Orientation::NoTransforms,
        }
    }
}

/// Decode raw upload bytes (PNG, JPEG) and read the embedded orientation.
///
/// A missing or unreadable orientation tag is treated as upright.
pub fn decode_source(bytes: &[u8]) -> Result<SourceImage> {
    let reader = ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PolyglotError::ExtractionFailed(format!("Failed to read image: {e}")))?;

    let mut decoder = reader
        .into_decoder()
        .map_err(|e| PolyglotError::ExtractionFailed(format!("Failed to decode image: {e}")))?;

    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);

    let image = DynamicImage::from_decoder(decoder)
        .map_err(|e| PolyglotError::ExtractionFailed(format!("Failed to decode image: {e}")))?;

    Ok(SourceImage { image, orientation })
}

/// Normalizes photographed or scanned text for OCR.
///
/// Applies, in order:
/// 1. EXIF orientation correction
/// 2. Grayscale conversion
/// 3. Contrast scaling by `contrast_factor` around the mean luminance
///
/// The steps are order-sensitive: contrast scaling assumes single-channel input.
#[derive(Debug, Clone, Copy)]
pub struct ImagePreprocessor {
    contrast_factor: f32,
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new(DEFAULT_CONTRAST_FACTOR)
    }
}

impl ImagePreprocessor {
    pub fn new(contrast_factor: f32) -> Self {
        Self { contrast_factor }
    }

    pub fn contrast_factor(&self) -> f32 {
        self.contrast_factor
    }

    pub fn preprocess(&self, source: SourceImage) -> GrayImage {
        let mut img = source.image;
        img.apply_orientation(source.orientation);

        let gray = img.to_luma8();
        enhance_contrast(gray, self.contrast_factor)
    }

    /// Preprocess and encode as PNG, the format handed to OCR engines.
    pub fn preprocess_to_png(&self, source: SourceImage) -> Result<Vec<u8>> {
        let gray = self.preprocess(source);

        let mut output = Vec::new();
        DynamicImage::ImageLuma8(gray)
            .write_to(&mut std::io::Cursor::new(&mut output), ImageFormat::Png)
            .map_err(|e| PolyglotError::ExtractionFailed(format!("Failed to encode image: {e}")))?;

        Ok(output)
    }
}

fn mean_luminance(gray: &GrayImage) -> u8 {
    let count = u64::from(gray.width()) * u64::from(gray.height());
    if count == 0 {
        return 0;
    }
    let sum: u64 = gray.pixels().map(|p| u64::from(p[0])).sum();
    // Round half up, matching integer luminance statistics.
    ((sum as f64 / count as f64) + 0.5) as u8
}

/// Blend each pixel away from (factor > 1) or towards (factor < 1) the mean.
///
/// `factor == 1.0` returns the image unchanged.
fn enhance_contrast(gray: GrayImage, factor: f32) -> GrayImage {
    let mean = f32::from(mean_luminance(&gray));

    let mut out = gray;
    for pixel in out.pixels_mut() {
        let value = mean + factor * (f32::from(pixel[0]) - mean);
        *pixel = Luma([value.round().clamp(0.0, 255.0) as u8]);
    }
    out
}
