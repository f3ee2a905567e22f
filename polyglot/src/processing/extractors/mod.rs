pub mod docx;
pub mod image;
pub mod pdf;
pub mod plain_text;

pub use docx::DocxExtractor;
pub use image::ImageExtractor;
pub use pdf::PdfExtractor;
pub use plain_text::PlainTextExtractor;

use crate::error::{PolyglotError, Result};

/// Run a CPU-bound parser off the async worker threads.
pub(crate) async fn run_blocking<F>(bytes: &[u8], parse: F) -> Result<String>
where
    F: FnOnce(&[u8]) -> Result<String> + Send + 'static,
{
    let owned = bytes.to_vec();
    tokio::task::spawn_blocking(move || parse(&owned))
        .await
        .map_err(|e| PolyglotError::ExtractionFailed(format!("Extraction task panicked: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parser_panic_becomes_extraction_failure() {
        let result = run_blocking(b"bytes", |_| panic!("parser bug")).await;

        match result {
            Err(PolyglotError::ExtractionFailed(detail)) => assert!(detail.contains("panicked")),
            other => panic!("expected ExtractionFailed, got {other:?}"),
        }
    }
}
