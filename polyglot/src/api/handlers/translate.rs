use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::extractors::AppJson;
use crate::api::AppState;
use crate::error::{PolyglotError, Result};
use crate::translation::TranslationResult;

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub target_lang: Option<String>,
}

/// `POST /translate`
pub async fn translate_text(
    State(state): State<AppState>,
    AppJson(req): AppJson<TranslateRequest>,
) -> Result<Json<TranslationResult>> {
    let text = req.text.ok_or(PolyglotError::EmptyInput)?;
    let target = state.target_language(req.target_lang.as_deref());

    let result = state.gateway.translate(&text, &target).await?;
    Ok(Json(result))
}
