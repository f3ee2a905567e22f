use async_trait::async_trait;

use super::run_blocking;
use crate::error::{PolyglotError, Result};
use crate::processing::FormatExtractor;

pub struct PdfExtractor;

impl PdfExtractor {
    pub fn extract_text(bytes: &[u8]) -> Result<String> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| PolyglotError::ExtractionFailed(format!("PDF parse error: {e}")))?;

        Ok(join_pages(pages))
    }
}

/// Concatenate page texts in order, each followed by a newline.
///
/// Pages that yield no text contribute nothing at all. Whitespace-only pages
/// are kept as extracted.
fn join_pages<I>(pages: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut text = String::new();
    for page in pages {
        if page.is_empty() {
            continue;
        }
        text.push_str(&page);
        text.push('\n');
    }
    text
}

#[async_trait]
impl FormatExtractor for PdfExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<String> {
        run_blocking(bytes, Self::extract_text).await
    }
}
