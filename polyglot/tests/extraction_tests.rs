mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;

use polyglot::error::PolyglotError;
use polyglot::ocr::{ImagePreprocessor, OcrProvider, DEFAULT_CONTRAST_FACTOR};
use polyglot::processing::{ExtractionDispatcher, SourceDocument};

use common::{docx_bytes, pdf_bytes, pdf_bytes_with_missing_font, png_bytes, FixedOcr};

fn dispatcher_with(ocr: Arc<FixedOcr>) -> ExtractionDispatcher {
    ExtractionDispatcher::new(ocr, ImagePreprocessor::new(DEFAULT_CONTRAST_FACTOR))
}

#[tokio::test]
async fn test_docx_paragraphs_in_document_order() {
    common::init_test_logger();
    let dispatcher = dispatcher_with(FixedOcr::new("unused"));
    let bytes = docx_bytes(&["First paragraph", "Second paragraph"]);

    let text = dispatcher.extract("report.docx", &bytes).await.unwrap();

    assert_eq!(text, "First paragraph\nSecond paragraph\n");
}

#[tokio::test]
async fn test_docx_with_only_empty_paragraphs_has_no_text() {
    let dispatcher = dispatcher_with(FixedOcr::new("unused"));
    let bytes = docx_bytes(&["", ""]);

    let err = dispatcher.extract("blank.docx", &bytes).await.unwrap_err();
    assert!(matches!(err, PolyglotError::NoTextExtracted));
}

#[tokio::test]
async fn test_pdf_pages_are_concatenated() {
    let dispatcher = dispatcher_with(FixedOcr::new("unused"));
    let bytes = pdf_bytes(&[Some("Alpha page"), None, Some("Omega page")]);

    let text = dispatcher.extract("book.pdf", &bytes).await.unwrap();

    let alpha = text.find("Alpha").expect("first page text");
    let omega = text.find("Omega").expect("last page text");
    assert!(alpha < omega);
}

#[tokio::test]
async fn test_pdf_without_text_has_no_text() {
    let dispatcher = dispatcher_with(FixedOcr::new("unused"));
    let bytes = pdf_bytes(&[None, None]);

    let err = dispatcher.extract("scan.pdf", &bytes).await.unwrap_err();
    assert!(matches!(err, PolyglotError::NoTextExtracted));
}

#[tokio::test]
async fn test_pdf_with_undeclared_font_fails_extraction() {
    let dispatcher = dispatcher_with(FixedOcr::new("unused"));
    let bytes = pdf_bytes_with_missing_font("Broken page");

    let err = dispatcher.extract("broken.pdf", &bytes).await.unwrap_err();
    assert!(matches!(err, PolyglotError::ExtractionFailed(_)), "{err:?}");

    // The dispatcher keeps serving after a parser failure.
    let text = dispatcher.extract("notes.txt", b"still up").await.unwrap();
    assert_eq!(text, "still up");
}

#[tokio::test]
async fn test_image_goes_through_ocr() {
    let ocr = FixedOcr::new("Text on a sign");
    let dispatcher = dispatcher_with(ocr.clone());

    let text = dispatcher
        .extract("photo.jpg", &png_bytes(32, 16))
        .await
        .unwrap();

    assert_eq!(text, "Text on a sign");
    assert_eq!(ocr.call_count(), 1);
}

#[tokio::test]
async fn test_image_with_blank_ocr_result_has_no_text() {
    let dispatcher = dispatcher_with(FixedOcr::new("  \n "));

    let err = dispatcher
        .extract("photo.png", &png_bytes(16, 16))
        .await
        .unwrap_err();
    assert!(matches!(err, PolyglotError::NoTextExtracted));
}

#[tokio::test]
async fn test_corrupt_image_never_reaches_ocr() {
    let ocr = FixedOcr::new("unused");
    let dispatcher = dispatcher_with(ocr.clone());

    let err = dispatcher
        .extract("photo.png", b"not really a png")
        .await
        .unwrap_err();

    assert!(matches!(err, PolyglotError::ExtractionFailed(_)));
    assert_eq!(ocr.call_count(), 0);
}

#[tokio::test]
async fn test_image_with_unavailable_engine_fails_extraction() {
    let dispatcher = ExtractionDispatcher::new(
        Arc::new(OcrProvider::unavailable("tesseract not installed")),
        ImagePreprocessor::new(DEFAULT_CONTRAST_FACTOR),
    );

    let err = dispatcher
        .extract("photo.png", &png_bytes(16, 16))
        .await
        .unwrap_err();
    assert!(matches!(err, PolyglotError::ExtractionFailed(_)));
}

#[tokio::test]
async fn test_extension_is_case_insensitive() {
    let dispatcher = dispatcher_with(FixedOcr::new("unused"));

    let text = dispatcher.extract("NOTES.TXT", b"hello").await.unwrap();
    assert_eq!(text, "hello");

    let document = SourceDocument::new("Report.DocX", docx_bytes(&["Mixed case"]));
    let text = dispatcher.extract_document(&document).await.unwrap();
    assert_eq!(text, "Mixed case\n");
}

#[tokio::test]
async fn test_unsupported_extension_is_rejected() {
    let ocr = FixedOcr::new("unused");
    let dispatcher = dispatcher_with(ocr.clone());

    let err = dispatcher
        .extract("diagram.bmp", &png_bytes(8, 8))
        .await
        .unwrap_err();

    assert!(matches!(err, PolyglotError::UnsupportedFormat(_)));
    assert_eq!(ocr.call_count(), 0);
}

#[tokio::test]
async fn test_invalid_utf8_text_fails_extraction() {
    let dispatcher = dispatcher_with(FixedOcr::new("unused"));

    let err = dispatcher
        .extract("latin1.txt", &[0x63, 0x61, 0x66, 0xE9])
        .await
        .unwrap_err();
    assert!(matches!(err, PolyglotError::ExtractionFailed(_)));
}
