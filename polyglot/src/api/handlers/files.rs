use std::path::PathBuf;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::api::extractors::{UploadForm, UploadedFile};
use crate::api::AppState;
use crate::error::{PolyglotError, Result};
use crate::processing::SourceDocument;
use crate::translation::TranslationResult;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub file_name: String,
    pub saved_at: String,
}

fn require_file(form: &mut UploadForm, field: &str) -> Result<UploadedFile> {
    let file = form
        .take_file(field)
        .ok_or_else(|| PolyglotError::Validation("No file found".to_string()))?;

    if file.file_name.is_empty() {
        return Err(PolyglotError::Validation("No selected file".to_string()));
    }

    Ok(file)
}

/// Reduce a client-supplied filename to its final path component.
fn sanitize_filename(raw: &str) -> Result<String> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or("").trim();

    match name {
        "" | "." | ".." => Err(PolyglotError::Validation(format!(
            "Invalid file name: {raw:?}"
        ))),
        _ => Ok(name.to_string()),
    }
}

/// `POST /file_translate`
pub async fn file_translate(
    State(state): State<AppState>,
    mut form: UploadForm,
) -> Result<Json<TranslationResult>> {
    let file = require_file(&mut form, "file")?;
    let target = state.target_language(form.text("target_lang"));

    let document =
        SourceDocument::new(file.file_name, file.bytes).with_content_type(file.content_type);
    let text = state.dispatcher.extract_document(&document).await?;

    let result = state.gateway.translate(&text, &target).await?;
    Ok(Json(result))
}

/// `POST /upload_file`
pub async fn upload_file(
    State(state): State<AppState>,
    mut form: UploadForm,
) -> Result<Json<UploadResponse>> {
    let file = require_file(&mut form, "file")?;
    let file_name = sanitize_filename(&file.file_name)?;

    let dir = PathBuf::from(&state.config.server.upload_dir);
    tokio::fs::create_dir_all(&dir).await?;

    let path = dir.join(&file_name);
    tokio::fs::write(&path, &file.bytes).await?;

    let saved_at = path.display().to_string();
    info!(file = %file_name, bytes = file.bytes.len(), path = %saved_at, "File uploaded");

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        file_name,
        saved_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_plain_names() {
        assert_eq!(sanitize_filename("notes.txt").unwrap(), "notes.txt");
        assert_eq!(sanitize_filename(" report v2.pdf ").unwrap(), "report v2.pdf");
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\scan.png").unwrap(), "scan.png");
        assert_eq!(sanitize_filename("/abs/path/a.docx").unwrap(), "a.docx");
    }

    #[test]
    fn test_sanitize_rejects_empty_and_dot_names() {
        for raw in ["", "   ", ".", "..", "dir/", "a/.."] {
            assert!(
                matches!(sanitize_filename(raw), Err(PolyglotError::Validation(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
