use std::sync::Arc;

use tracing::{debug, warn};

use super::{TargetLanguage, TextTranslator, TranslationResult, AUTO_DETECT};
use crate::error::{PolyglotError, Result};

#[derive(Clone)]
pub struct TranslationGateway {
    translator: Arc<dyn TextTranslator>,
}

impl TranslationGateway {
    pub fn new(translator: Arc<dyn TextTranslator>) -> Self {
        Self { translator }
    }

    /// Translate `text` into `target`, auto-detecting the source language.
    ///
    /// Blank text is rejected before the provider is contacted. Provider
    /// failures surface once as [`PolyglotError::Translation`].
    pub async fn translate(&self, text: &str, target: &TargetLanguage) -> Result<TranslationResult> {
        if text.trim().is_empty() {
            return Err(PolyglotError::EmptyInput);
        }

        debug!(lang = %target, chars = text.chars().count(), "Translating text");

        let translated_text = self
            .translator
            .translate_text(text, AUTO_DETECT, target.code())
            .await
            .map_err(|e| {
                warn!(lang = %target, error = %e, "Translation failed");
                match e {
                    PolyglotError::Translation(_) => e,
                    other => PolyglotError::Translation(other.to_string()),
                }
            })?;

        Ok(TranslationResult {
            original_text: text.to_string(),
            translated_text,
        })
    }
}
