use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolyglotError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("No text extracted from file")]
    NoTextExtracted,

    #[error("No text provided")]
    EmptyInput,

    #[error("Translation API failed: {0}")]
    Translation(String),

    #[error("Could not understand audio")]
    SpeechNotUnderstood,

    #[error("Speech recognition service error: {0}")]
    SpeechService(String),

    #[error("Discovery service bind failed: {0}")]
    DiscoveryBindFailed(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("OCR unavailable: {0}")]
    OcrUnavailable(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl PolyglotError {
    pub fn status(&self) -> StatusCode {
        match self {
            PolyglotError::UnsupportedFormat(_)
            | PolyglotError::NoTextExtracted
            | PolyglotError::EmptyInput
            | PolyglotError::SpeechNotUnderstood
            | PolyglotError::Validation(_)
            | PolyglotError::Json(_) => StatusCode::BAD_REQUEST,
            PolyglotError::Translation(_)
            | PolyglotError::SpeechService(_)
            | PolyglotError::Http(_) => StatusCode::BAD_GATEWAY,
            PolyglotError::OcrUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            PolyglotError::ExtractionFailed(_)
            | PolyglotError::Ocr(_)
            | PolyglotError::DiscoveryBindFailed(_)
            | PolyglotError::Io(_)
            | PolyglotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PolyglotError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, PolyglotError>;
