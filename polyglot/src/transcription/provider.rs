use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::TranscriptionConfig;
use crate::error::{PolyglotError, Result};

use super::api::TranscriptionApiClient;
use super::preprocessing::encode_wav_pcm16;
use super::SpeechToText;

enum TranscriptionBackend {
    Api { client: TranscriptionApiClient },
    Unavailable { reason: String },
}

pub struct TranscriptionProvider {
    backend: TranscriptionBackend,
    timeout: Duration,
}

impl TranscriptionProvider {
    pub fn new(config: &TranscriptionConfig) -> Self {
        let backend = match TranscriptionApiClient::new(config) {
            Ok(client) => {
                info!(model = %config.model, "Transcription API backend initialized");
                TranscriptionBackend::Api { client }
            }
            Err(e) => {
                let reason = format!("Transcription API backend unavailable: {e}");
                warn!("{}", reason);
                TranscriptionBackend::Unavailable { reason }
            }
        };

        Self {
            backend,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: TranscriptionBackend::Unavailable {
                reason: reason.to_string(),
            },
            timeout: Duration::from_secs(TranscriptionConfig::default().timeout_secs),
        }
    }

    async fn transcribe_internal(&self, samples: &[i16], sample_rate: u32) -> Result<String> {
        match &self.backend {
            TranscriptionBackend::Api { client } => {
                client
                    .transcribe_wav(encode_wav_pcm16(samples, sample_rate))
                    .await
            }
            TranscriptionBackend::Unavailable { reason } => {
                Err(PolyglotError::SpeechService(reason.clone()))
            }
        }
    }
}

#[async_trait]
impl SpeechToText for TranscriptionProvider {
    async fn transcribe(&self, samples: &[i16], sample_rate: u32) -> Result<String> {
        match tokio::time::timeout(self.timeout, self.transcribe_internal(samples, sample_rate))
            .await
        {
            Ok(inner_result) => inner_result,
            Err(_) => Err(PolyglotError::SpeechService(format!(
                "Transcription timed out after {} seconds",
                self.timeout.as_secs()
            ))),
        }
    }

    fn is_available(&self) -> bool {
        !matches!(self.backend, TranscriptionBackend::Unavailable { .. })
    }
}
