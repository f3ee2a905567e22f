use async_trait::async_trait;

use crate::error::Result;

/// Turns the raw bytes of one document format into plain text.
///
/// Implementations report malformed input as `ExtractionFailed`. An empty
/// result is not an error here; the dispatcher decides what empty means.
#[async_trait]
pub trait FormatExtractor: Send + Sync {
    async fn extract(&self, bytes: &[u8]) -> Result<String>;
}
