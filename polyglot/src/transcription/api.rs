use std::time::Duration;

use reqwest::{multipart, Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::TranscriptionConfig,
    error::{PolyglotError, Result},
};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Client for an OpenAI-compatible `/audio/transcriptions` endpoint.
#[derive(Debug, Clone)]
pub struct TranscriptionApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    language: Option<String>,
}

impl TranscriptionApiClient {
    pub fn new(config: &TranscriptionConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            PolyglotError::SpeechService("API key required for transcription API".to_string())
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PolyglotError::SpeechService(format!("Failed to create HTTP client: {e}")))?;

        let model = config
            .model
            .split_once('/')
            .map(|(_, m)| m.to_string())
            .unwrap_or_else(|| config.model.clone());

        Ok(Self {
            client,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
            model,
            language: config.language.clone(),
        })
    }

    /// Send a WAV recording and return the transcript.
    ///
    /// A transcript that is empty after trimming means the speech was not
    /// understood.
    pub async fn transcribe_wav(&self, wav: Vec<u8>) -> Result<String> {
        let file_part = multipart::Part::bytes(wav)
            .file_name("speech.wav")
            .mime_str("audio/wav")
            .map_err(|e| PolyglotError::SpeechService(format!("Invalid MIME type: {e}")))?;

        let mut form = multipart::Form::new()
            .part("file", file_part)
            .text("model", self.model.clone())
            .text("response_format", "json");
        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        let url = format!("{}/audio/transcriptions", self.base_url);
        debug!("Sending transcription request to {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PolyglotError::SpeechService("Request timeout".to_string())
                } else {
                    PolyglotError::SpeechService(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        debug!("Transcription response status: {}", status);

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(map_http_error(status, &error_body));
        }

        let parsed: TranscriptionResponse = response.json().await.map_err(|e| {
            PolyglotError::SpeechService(format!("Failed to parse transcription response: {e}"))
        })?;

        let text = parsed.text.trim();
        if text.is_empty() {
            return Err(PolyglotError::SpeechNotUnderstood);
        }

        Ok(text.to_string())
    }
}

fn map_http_error(status: StatusCode, error_body: &str) -> PolyglotError {
    match status {
        StatusCode::UNAUTHORIZED => PolyglotError::SpeechService(format!(
            "Authentication failed (401): Invalid API key. Error: {error_body}"
        )),
        StatusCode::TOO_MANY_REQUESTS => PolyglotError::SpeechService(format!(
            "Rate limit exceeded (429): Too many requests. Error: {error_body}"
        )),
        _ => PolyglotError::SpeechService(format!(
            "Speech API error ({status}): {error_body}"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_string_contains, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn test_config(base_url: Option<String>) -> TranscriptionConfig {
        TranscriptionConfig {
            model: "openai/whisper-1".to_string(),
            api_key: Some("test-api-key".to_string()),
            base_url,
            language: None,
            timeout_secs: 10,
        }
    }

    #[test]
    fn test_api_client_creation_no_api_key() {
        let mut config = test_config(None);
        config.api_key = None;

        let result = TranscriptionApiClient::new(&config);
        assert!(matches!(result, Err(PolyglotError::SpeechService(_))));
    }

    #[test]
    fn test_model_prefix_is_stripped() {
        let client = TranscriptionApiClient::new(&test_config(None)).unwrap();
        assert_eq!(client.model, "whisper-1");
        assert_eq!(client.base_url, OPENAI_BASE_URL);
    }

    #[tokio::test]
    async fn test_transcribe_sends_wav_with_auth() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .and(header("Authorization", "Bearer test-api-key"))
            .and(body_string_contains("speech.wav"))
            .and(body_string_contains("whisper-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "text": " Good morning "
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TranscriptionApiClient::new(&test_config(Some(mock_server.uri()))).unwrap();
        let text = client.transcribe_wav(b"RIFF....".to_vec()).await.unwrap();
        assert_eq!(text, "Good morning");
    }

    #[tokio::test]
    async fn test_empty_transcript_is_not_understood() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "text": "   "
            })))
            .mount(&mock_server)
            .await;

        let client = TranscriptionApiClient::new(&test_config(Some(mock_server.uri()))).unwrap();
        let result = client.transcribe_wav(Vec::new()).await;
        assert!(matches!(result, Err(PolyglotError::SpeechNotUnderstood)));
    }

    #[tokio::test]
    async fn test_api_error_401() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "message": "Invalid API key", "code": "invalid_api_key" }
            })))
            .mount(&mock_server)
            .await;

        let client = TranscriptionApiClient::new(&test_config(Some(mock_server.uri()))).unwrap();
        let error = client.transcribe_wav(Vec::new()).await.unwrap_err();

        assert!(matches!(error, PolyglotError::SpeechService(_)));
        assert!(error.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TranscriptionApiClient::new(&test_config(Some(mock_server.uri()))).unwrap();
        let error = client.transcribe_wav(Vec::new()).await.unwrap_err();
        assert!(error.to_string().contains("500"));
    }
}
