use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{PolyglotError, Result};
use crate::ocr::{decode_source, ImagePreprocessor, ImageToText};
use crate::processing::FormatExtractor;

/// OCR extraction for scanned or photographed text.
pub struct ImageExtractor {
    ocr: Arc<dyn ImageToText>,
    preprocessor: ImagePreprocessor,
}

impl ImageExtractor {
    pub fn new(ocr: Arc<dyn ImageToText>, preprocessor: ImagePreprocessor) -> Self {
        Self { ocr, preprocessor }
    }
}

/// Decode, preprocess and PNG-encode an upload for the OCR engine.
pub fn prepare_png(preprocessor: &ImagePreprocessor, bytes: &[u8]) -> Result<Vec<u8>> {
    let source = decode_source(bytes)?;
    preprocessor.preprocess_to_png(source)
}

#[async_trait]
impl FormatExtractor for ImageExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<String> {
        let owned = bytes.to_vec();
        let preprocessor = self.preprocessor;
        let png = tokio::task::spawn_blocking(move || prepare_png(&preprocessor, &owned))
            .await
            .map_err(|e| PolyglotError::ExtractionFailed(format!("Image task panicked: {e}")))??;

        debug!(png_bytes = png.len(), "Image preprocessed for OCR");

        self.ocr.image_to_text(&png).await.map_err(|e| match e {
            PolyglotError::ExtractionFailed(_) => e,
            other => PolyglotError::ExtractionFailed(other.to_string()),
        })
    }
}
