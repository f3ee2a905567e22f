use async_trait::async_trait;
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, Run, RunChild};

use super::run_blocking;
use crate::error::{PolyglotError, Result};
use crate::processing::FormatExtractor;

pub struct DocxExtractor;

impl DocxExtractor {
    /// Text of every top-level paragraph in document order, one per line.
    ///
    /// Tables, drawings and section content outside the body paragraphs are
    /// not part of the output.
    pub fn extract_text(bytes: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| PolyglotError::ExtractionFailed(format!("DOCX parse error: {e}")))?;

        let mut text = String::new();
        for child in &docx.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                Self::push_paragraph(&mut text, paragraph);
                text.push('\n');
            }
        }

        Ok(text)
    }

    fn push_paragraph(out: &mut String, paragraph: &Paragraph) {
        for child in &paragraph.children {
            Self::push_paragraph_child(out, child);
        }
    }

    fn push_paragraph_child(out: &mut String, child: &ParagraphChild) {
        match child {
            ParagraphChild::Run(run) => Self::push_run(out, run),
            ParagraphChild::Hyperlink(link) => {
                for inner in &link.children {
                    Self::push_paragraph_child(out, inner);
                }
            }
            _ => {}
        }
    }

    fn push_run(out: &mut String, run: &Run) {
        for run_child in &run.children {
            match run_child {
                RunChild::Text(t) => out.push_str(&t.text),
                RunChild::Tab(_) => out.push('\t'),
                RunChild::Break(_) => out.push('\n'),
                _ => {}
            }
        }
    }
}

#[async_trait]
impl FormatExtractor for DocxExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<String> {
        run_blocking(bytes, Self::extract_text).await
    }
}
