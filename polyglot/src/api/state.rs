use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Config;
use crate::ocr::{ImagePreprocessor, ImageToText};
use crate::processing::ExtractionDispatcher;
use crate::transcription::SpeechToText;
use crate::translation::{TargetLanguage, TextTranslator, TranslationGateway};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dispatcher: ExtractionDispatcher,
    pub gateway: TranslationGateway,
    pub speech: Arc<dyn SpeechToText>,
    pub ocr_available: bool,
    /// Bound address of the discovery responder, when it is running.
    pub discovery_addr: Option<SocketAddr>,
}

impl AppState {
    pub fn new(
        config: Config,
        ocr: Arc<dyn ImageToText>,
        translator: Arc<dyn TextTranslator>,
        speech: Arc<dyn SpeechToText>,
    ) -> Self {
        let ocr_available = ocr.is_available();
        let preprocessor = ImagePreprocessor::new(config.ocr.contrast_factor);

        Self {
            config: Arc::new(config),
            dispatcher: ExtractionDispatcher::new(ocr, preprocessor),
            gateway: TranslationGateway::new(translator),
            speech,
            ocr_available,
            discovery_addr: None,
        }
    }

    pub fn with_discovery(mut self, addr: Option<SocketAddr>) -> Self {
        self.discovery_addr = addr;
        self
    }

    pub fn target_language(&self, raw: Option<&str>) -> TargetLanguage {
        TargetLanguage::parse(raw, &self.config.translation.default_target)
    }
}
