use std::sync::Arc;

use tracing::{debug, info};

use super::extractors::{DocxExtractor, ImageExtractor, PdfExtractor, PlainTextExtractor};
use super::{DocumentFormat, FormatExtractor, SourceDocument};
use crate::error::{PolyglotError, Result};
use crate::ocr::{ImagePreprocessor, ImageToText};

/// Routes an upload to the extractor for its format.
///
/// Every branch shares one post-condition: a result that is empty or only
/// whitespace becomes [`PolyglotError::NoTextExtracted`].
#[derive(Clone)]
pub struct ExtractionDispatcher {
    plain_text: Arc<dyn FormatExtractor>,
    docx: Arc<dyn FormatExtractor>,
    pdf: Arc<dyn FormatExtractor>,
    image: Arc<dyn FormatExtractor>,
}

impl ExtractionDispatcher {
    pub fn new(ocr: Arc<dyn ImageToText>, preprocessor: ImagePreprocessor) -> Self {
        Self {
            plain_text: Arc::new(PlainTextExtractor),
            docx: Arc::new(DocxExtractor),
            pdf: Arc::new(PdfExtractor),
            image: Arc::new(ImageExtractor::new(ocr, preprocessor)),
        }
    }

    pub fn with_extractors(
        plain_text: Arc<dyn FormatExtractor>,
        docx: Arc<dyn FormatExtractor>,
        pdf: Arc<dyn FormatExtractor>,
        image: Arc<dyn FormatExtractor>,
    ) -> Self {
        Self {
            plain_text,
            docx,
            pdf,
            image,
        }
    }

    fn extractor_for(&self, format: DocumentFormat) -> &Arc<dyn FormatExtractor> {
        match format {
            DocumentFormat::PlainText => &self.plain_text,
            DocumentFormat::Docx => &self.docx,
            DocumentFormat::Pdf => &self.pdf,
            DocumentFormat::Image => &self.image,
        }
    }

    pub async fn extract(&self, filename: &str, bytes: &[u8]) -> Result<String> {
        self.extract_with_type(filename, None, bytes).await
    }

    /// Extract an upload. The declared content type is logged only; the
    /// filename alone selects the extractor.
    pub async fn extract_document(&self, document: &SourceDocument) -> Result<String> {
        self.extract_with_type(
            &document.filename,
            document.content_type.as_deref(),
            &document.bytes,
        )
        .await
    }

    async fn extract_with_type(
        &self,
        filename: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String> {
        let format = DocumentFormat::from_filename(filename)?;
        debug!(
            filename,
            %format,
            content_type = content_type.unwrap_or("unknown"),
            size = bytes.len(),
            "Dispatching extraction"
        );

        let text = self.extractor_for(format).extract(bytes).await?;

        if text.trim().is_empty() {
            return Err(PolyglotError::NoTextExtracted);
        }

        info!(filename, %format, chars = text.chars().count(), "Text extracted");
        Ok(text)
    }
}
