use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use leptess::LepTess;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::OcrConfig;
use crate::error::{PolyglotError, Result};

use super::api::VisionOcrClient;

/// External image-to-text collaborator.
///
/// Receives an already-preprocessed PNG and returns whatever text the engine
/// recognised, which may be empty.
#[async_trait]
pub trait ImageToText: Send + Sync {
    async fn image_to_text(&self, png_bytes: &[u8]) -> Result<String>;

    fn is_available(&self) -> bool {
        true
    }
}

enum OcrBackend {
    Local { tesseract: Arc<Mutex<LepTess>> },
    Api { client: VisionOcrClient },
    Unavailable { reason: String },
}

pub struct OcrProvider {
    backend: OcrBackend,
    timeout: Duration,
}

fn create_tesseract(languages: &str) -> std::result::Result<LepTess, String> {
    LepTess::new(None, languages).map_err(|e| e.to_string())
}

impl OcrProvider {
    pub fn new(config: &OcrConfig) -> Self {
        let model_lower = config.model.to_lowercase();
        let provider_prefix = model_lower.split('/').next().unwrap_or("local");

        let backend = match provider_prefix {
            "openai" => match VisionOcrClient::new(config) {
                Ok(client) => {
                    info!(model = %config.model, "Vision OCR API backend initialized");
                    OcrBackend::Api { client }
                }
                Err(e) => {
                    let reason = format!("Vision OCR backend unavailable: {e}");
                    warn!("{}", reason);
                    OcrBackend::Unavailable { reason }
                }
            },
            _ => match create_tesseract(&config.languages) {
                Ok(lt) => {
                    info!(languages = %config.languages, "Tesseract OCR initialized");
                    OcrBackend::Local {
                        tesseract: Arc::new(Mutex::new(lt)),
                    }
                }
                Err(e) => {
                    let reason = format!("Tesseract not available: {e}. Is Tesseract installed?");
                    warn!("{}", reason);
                    OcrBackend::Unavailable { reason }
                }
            },
        };

        Self {
            backend,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: OcrBackend::Unavailable {
                reason: reason.to_string(),
            },
            timeout: Duration::from_secs(OcrConfig::default().timeout_secs),
        }
    }

    async fn ocr_internal(&self, image_bytes: &[u8]) -> Result<String> {
        match &self.backend {
            OcrBackend::Local { tesseract } => {
                let bytes = image_bytes.to_vec();
                let tesseract = Arc::clone(tesseract);

                let text = tokio::task::spawn_blocking(move || {
                    let mut lt = tesseract.blocking_lock();
                    lt.set_image_from_mem(&bytes)
                        .map_err(|e| PolyglotError::Ocr(format!("Failed to set image: {e}")))?;
                    lt.get_utf8_text()
                        .map_err(|e| PolyglotError::Ocr(format!("Failed to extract text: {e}")))
                })
                .await
                .map_err(|e| PolyglotError::Ocr(format!("OCR task panicked: {e}")))??;

                Ok(text)
            }
            OcrBackend::Api { client } => client.ocr(image_bytes).await,
            OcrBackend::Unavailable { reason } => {
                Err(PolyglotError::OcrUnavailable(reason.clone()))
            }
        }
    }
}

#[async_trait]
impl ImageToText for OcrProvider {
    async fn image_to_text(&self, png_bytes: &[u8]) -> Result<String> {
        match tokio::time::timeout(self.timeout, self.ocr_internal(png_bytes)).await {
            Ok(inner_result) => inner_result,
            Err(_) => Err(PolyglotError::Ocr(format!(
                "OCR operation timed out after {} seconds",
                self.timeout.as_secs()
            ))),
        }
    }

    fn is_available(&self) -> bool {
        !matches!(self.backend, OcrBackend::Unavailable { .. })
    }
}
