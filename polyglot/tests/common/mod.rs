#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;

use polyglot::error::{PolyglotError, Result};
use polyglot::ocr::ImageToText;
use polyglot::transcription::SpeechToText;
use polyglot::translation::TextTranslator;

pub const BOUNDARY: &str = "polyglot-test-boundary";

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build a DOCX with one plain run per paragraph.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    use docx_rs::*;

    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
    });

    let mut buffer = Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).expect("Failed to pack DOCX");
    buffer.into_inner()
}

/// Build a PDF with one page per entry; `None` produces a page without text.
pub fn pdf_bytes(pages: &[Option<&str>]) -> Vec<u8> {
    build_pdf(pages, true)
}

/// A one-page PDF whose text selects a font the page never declares.
pub fn pdf_bytes_with_missing_font(text: &str) -> Vec<u8> {
    build_pdf(&[Some(text)], false)
}

fn build_pdf(pages: &[Option<&str>], with_resources: bool) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let operations = match page {
            Some(text) => vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
            None => vec![],
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("Failed to encode PDF content"),
        ));

        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        if with_resources {
            page.set("Resources", resources_id);
        }
        let page_id = doc.add_object(page);
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("Failed to save PDF");
    buffer
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, _| {
        if x % 8 < 4 {
            image::Rgb([20, 20, 20])
        } else {
            image::Rgb([230, 230, 230])
        }
    });

    let mut buffer = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
        .expect("Failed to encode PNG");
    buffer
}

/// One second of a 440 Hz tone as 16 kHz mono WAV.
pub fn wav_bytes() -> Vec<u8> {
    let samples: Vec<i16> = (0..16000)
        .map(|i| {
            let t = i as f32 / 16000.0;
            ((t * 440.0 * 2.0 * std::f32::consts::PI).sin() * 8000.0) as i16
        })
        .collect();
    polyglot::transcription::encode_wav_pcm16(&samples, 16000)
}

pub enum Part<'a> {
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Translator that tags text with the target code and records every call.
#[derive(Default)]
pub struct RecordingTranslator {
    pub calls: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl TextTranslator for RecordingTranslator {
    async fn translate_text(&self, text: &str, _source: &str, target: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), target.to_string()));
        Ok(format!("[{target}] {}", text.trim()))
    }
}

impl RecordingTranslator {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

/// OCR engine that returns a fixed transcript.
pub struct FixedOcr {
    pub text: String,
    pub calls: Mutex<usize>,
}

impl FixedOcr {
    pub fn new(text: &str) -> Arc<Self> {
        Arc::new(Self {
            text: text.to_string(),
            calls: Mutex::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ImageToText for FixedOcr {
    async fn image_to_text(&self, _png_bytes: &[u8]) -> Result<String> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.text.clone())
    }
}

/// Speech recognizer with a scripted outcome.
pub enum ScriptedSpeech {
    Heard(String),
    NotUnderstood,
    ServiceDown,
}

#[async_trait]
impl SpeechToText for ScriptedSpeech {
    async fn transcribe(&self, samples: &[i16], sample_rate: u32) -> Result<String> {
        assert_eq!(sample_rate, 16000);
        assert!(!samples.is_empty());
        match self {
            Self::Heard(text) => Ok(text.clone()),
            Self::NotUnderstood => Err(PolyglotError::SpeechNotUnderstood),
            Self::ServiceDown => Err(PolyglotError::SpeechService("connection refused".to_string())),
        }
    }
}
