use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;

use crate::error::PolyglotError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(PolyglotError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for PolyglotError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> PolyglotError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            PolyglotError::Validation(format!("Invalid JSON: {}", err.body_text()))
        }
        JsonRejection::JsonSyntaxError(err) => {
            PolyglotError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => PolyglotError::Validation(
            "Missing `Content-Type: application/json` header".to_string(),
        ),
        JsonRejection::BytesRejection(_) => {
            PolyglotError::Internal("Failed to read request body".to_string())
        }
        _ => PolyglotError::Validation(rejection.body_text()),
    }
}

fn map_multipart_error(err: MultipartError) -> PolyglotError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PolyglotError::Validation("File too large".to_string())
    } else {
        PolyglotError::Validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}

/// A file part of a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A fully buffered multipart form.
///
/// Parts that carry a filename (even an empty one) are files; all other parts
/// are text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    files: Vec<(String, UploadedFile)>,
    fields: Vec<(String, String)>,
}

impl UploadForm {
    /// Remove and return the first file sent under `name`.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        let index = self.files.iter().position(|(field, _)| field == name)?;
        Some(self.files.remove(index).1)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = PolyglotError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| PolyglotError::Validation(e.body_text()))?;

        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
            let name = field.name().unwrap_or("").to_string();

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(map_multipart_error)?;
                    form.files.push((
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        },
                    ));
                }
                None => {
                    let value = field.text().await.map_err(map_multipart_error)?;
                    form.fields.push((name, value));
                }
            }
        }

        Ok(form)
    }
}
