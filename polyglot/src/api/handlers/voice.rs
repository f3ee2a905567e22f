use std::path::Path;

use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::api::extractors::UploadForm;
use crate::api::AppState;
use crate::error::{PolyglotError, Result};
use crate::transcription::{AudioPreprocessor, TARGET_SAMPLE_RATE};
use crate::translation::TranslationResult;

/// `POST /voice_translate`
///
/// Accepts the recording as multipart field `audio` (or `file`).
pub async fn voice_translate(
    State(state): State<AppState>,
    mut form: UploadForm,
) -> Result<Json<TranslationResult>> {
    let audio = form
        .take_file("audio")
        .or_else(|| form.take_file("file"))
        .ok_or_else(|| PolyglotError::Validation("No audio file found".to_string()))?;
    let target = state.target_language(form.text("target_lang"));

    let hint = Path::new(&audio.file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let samples =
        tokio::task::spawn_blocking(move || AudioPreprocessor::prepare(&audio.bytes, hint.as_deref()))
            .await
            .map_err(|e| PolyglotError::Internal(format!("Audio task panicked: {e}")))??;

    let text = state.speech.transcribe(&samples, TARGET_SAMPLE_RATE).await?;
    if text.trim().is_empty() {
        return Err(PolyglotError::SpeechNotUnderstood);
    }
    info!(chars = text.chars().count(), "Recognized speech");

    let result = state.gateway.translate(&text, &target).await?;
    Ok(Json(result))
}
