use std::fmt;

use crate::error::{PolyglotError, Result};

/// The closed set of upload formats text can be extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    PlainText,
    Docx,
    Pdf,
    Image,
}

impl DocumentFormat {
    /// Resolve a format from the suffix after the last `.`, ignoring case.
    ///
    /// A bare `.txt` counts as a text file.
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("txt") => Ok(Self::PlainText),
            Some("docx") => Ok(Self::Docx),
            Some("pdf") => Ok(Self::Pdf),
            Some("png" | "jpg" | "jpeg") => Ok(Self::Image),
            Some(other) => Err(PolyglotError::UnsupportedFormat(format!(".{other}"))),
            None => Err(PolyglotError::UnsupportedFormat(filename.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "text",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
