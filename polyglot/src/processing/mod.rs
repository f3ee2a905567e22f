//! Multi-format text extraction.
//!
//! An upload is routed by filename extension to exactly one
//! [`FormatExtractor`]; the [`ExtractionDispatcher`] then rejects results that
//! carry no text.

mod dispatcher;
mod extractor;
mod format;

pub mod extractors;

pub use dispatcher::ExtractionDispatcher;
pub use extractor::FormatExtractor;
pub use format::DocumentFormat;

/// An uploaded file as received, owned by the request that carries it.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type = content_type;
        self
    }
}
