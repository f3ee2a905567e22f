//! Machine translation.
//!
//! The [`TranslationGateway`] validates input and delegates to a
//! [`TextTranslator`] collaborator. The source language is always
//! auto-detected by the provider.

mod gateway;
mod google;
pub mod languages;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use gateway::TranslationGateway;
pub use google::GoogleTranslateClient;
pub use languages::TargetLanguage;

/// Source language marker asking the provider to detect the language itself.
pub const AUTO_DETECT: &str = "auto";

#[async_trait]
pub trait TextTranslator: Send + Sync {
    async fn translate_text(&self, text: &str, source: &str, target: &str) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
}
