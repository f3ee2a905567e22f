use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_non_empty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub discovery: DiscoveryConfig,
    pub ocr: OcrConfig,
    pub translation: TranslationConfig,
    pub transcription: TranscriptionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_size: usize,
    pub upload_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    pub enabled: bool,
    pub bind_host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub languages: String,
    pub timeout_secs: u64,
    pub contrast_factor: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationConfig {
    pub base_url: String,
    pub default_target: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub language: Option<String>,
    pub timeout_secs: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_host: "0.0.0.0".to_string(),
            port: 5005,
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model: "local/tesseract".to_string(),
            api_key: None,
            base_url: None,
            languages: "eng".to_string(),
            timeout_secs: 60,
            contrast_factor: 2.0,
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.googleapis.com".to_string(),
            default_target: "hi".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: "whisper-1".to_string(),
            api_key: None,
            base_url: None,
            language: None,
            timeout_secs: 120,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let discovery = DiscoveryConfig::default();
        let ocr = OcrConfig::default();
        let translation = TranslationConfig::default();
        let transcription = TranscriptionConfig::default();

        Self {
            server: ServerConfig {
                host: env::var("POLYGLOT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("POLYGLOT_PORT", 5000),
                max_upload_size: parse_env_or("MAX_UPLOAD_SIZE", 25 * 1024 * 1024),
                upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            },
            discovery: DiscoveryConfig {
                enabled: parse_env_or("DISCOVERY_ENABLED", discovery.enabled),
                bind_host: env::var("DISCOVERY_BIND_HOST").unwrap_or(discovery.bind_host),
                port: parse_env_or("DISCOVERY_PORT", discovery.port),
            },
            ocr: OcrConfig {
                model: env::var("OCR_MODEL").unwrap_or(ocr.model),
                api_key: env_non_empty("OCR_API_KEY"),
                base_url: env_non_empty("OCR_BASE_URL"),
                languages: env::var("OCR_LANGUAGES").unwrap_or(ocr.languages),
                timeout_secs: parse_env_or("OCR_TIMEOUT", ocr.timeout_secs),
                contrast_factor: parse_env_or("OCR_CONTRAST_FACTOR", ocr.contrast_factor),
            },
            translation: TranslationConfig {
                base_url: env::var("TRANSLATE_BASE_URL").unwrap_or(translation.base_url),
                default_target: env_non_empty("DEFAULT_TARGET_LANG")
                    .unwrap_or(translation.default_target),
                timeout_secs: parse_env_or("TRANSLATE_TIMEOUT", translation.timeout_secs),
            },
            transcription: TranscriptionConfig {
                model: env::var("TRANSCRIPTION_MODEL").unwrap_or(transcription.model),
                api_key: env_non_empty("TRANSCRIPTION_API_KEY"),
                base_url: env_non_empty("TRANSCRIPTION_BASE_URL"),
                language: env_non_empty("TRANSCRIPTION_LANGUAGE"),
                timeout_secs: parse_env_or("TRANSCRIPTION_TIMEOUT", transcription.timeout_secs),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
