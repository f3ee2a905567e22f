use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::AppState;
use crate::translation::languages::{supported_languages, LanguageEntry};

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub ocr: String,
    pub transcription: String,
    pub discovery: String,
}

fn availability(available: bool) -> String {
    if available { "available" } else { "unavailable" }.to_string()
}

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let discovery = match state.discovery_addr {
        Some(addr) => format!("listening on {addr}"),
        None => "disabled".to_string(),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ocr: availability(state.ocr_available),
        transcription: availability(state.speech.is_available()),
        discovery,
    })
}

/// `GET /languages`
pub async fn list_languages() -> Json<Vec<LanguageEntry>> {
    Json(supported_languages())
}
