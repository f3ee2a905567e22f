pub mod api;
pub mod config;
pub mod discovery;
pub mod error;
pub mod ocr;
pub mod processing;
pub mod transcription;
pub mod translation;
