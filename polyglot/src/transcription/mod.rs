mod api;
mod preprocessing;
mod provider;

use async_trait::async_trait;

use crate::error::Result;

pub use preprocessing::{encode_wav_pcm16, AudioPreprocessor, DecodedAudio, TARGET_SAMPLE_RATE};
pub use provider::TranscriptionProvider;

/// External speech-to-text collaborator.
///
/// Fails with `SpeechNotUnderstood` when no speech is recognised and
/// `SpeechService` when the provider itself fails.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, samples: &[i16], sample_rate: u32) -> Result<String>;

    fn is_available(&self) -> bool {
        true
    }
}
