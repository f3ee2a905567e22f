//! OCR (Optical Character Recognition) Module
//!
//! Image text extraction for uploaded scans and photos. Images are first
//! normalized by [`ImagePreprocessor`] and then handed to an [`ImageToText`]
//! collaborator.
//!
//! # Backends
//!
//! [`OcrProvider`] selects a backend from `OcrConfig::model`:
//! - `local/tesseract` (default): local OCR via leptess
//! - `openai/<model>`: an OpenAI-compatible vision chat endpoint
//!
//! A backend that cannot be initialised degrades to "unavailable" and reports
//! its reason on every call instead of aborting startup.

mod api;
mod preprocessing;
mod provider;

pub use preprocessing::{decode_source, ImagePreprocessor, SourceImage, DEFAULT_CONTRAST_FACTOR};
pub use provider::{ImageToText, OcrProvider};
