mod files;
mod health;
mod translate;
mod voice;

pub use files::{file_translate, upload_file, UploadResponse};
pub use health::{health_check, list_languages, HealthResponse};
pub use translate::{translate_text, TranslateRequest};
pub use voice::voice_translate;
