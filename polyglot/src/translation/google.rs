use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::TextTranslator;
use crate::config::TranslationConfig;
use crate::error::{PolyglotError, Result};

const TRANSLATE_PATH: &str = "/translate_a/single";

/// Client for the public Google Translate web endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslateClient {
    client: Client,
    base_url: String,
}

impl GoogleTranslateClient {
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PolyglotError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// The response is a nested array whose first element lists translated
/// segments as `[translated, original, ...]`.
fn parse_segments(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| PolyglotError::Translation("Unexpected response shape".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(PolyglotError::Translation(
            "Provider returned no translated text".to_string(),
        ));
    }

    Ok(translated)
}

#[async_trait]
impl TextTranslator for GoogleTranslateClient {
    async fn translate_text(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, TRANSLATE_PATH))
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
            ])
            .form(&[("q", text)])
            .send()
            .await
            .map_err(|e| PolyglotError::Translation(format!("Request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PolyglotError::Translation(format!(
                "Provider error ({status}): {body}"
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| PolyglotError::Translation(format!("Failed to parse response: {e}")))?;

        parse_segments(&body)
    }
}
