use async_trait::async_trait;

use crate::error::{PolyglotError, Result};
use crate::processing::FormatExtractor;

pub struct PlainTextExtractor;

impl PlainTextExtractor {
    /// Strict UTF-8 decode; the content is returned verbatim.
    pub fn extract_text(bytes: &[u8]) -> Result<String> {
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| PolyglotError::ExtractionFailed(format!("Invalid UTF-8 text: {e}")))
    }
}

#[async_trait]
impl FormatExtractor for PlainTextExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<String> {
        Self::extract_text(bytes)
    }
}
