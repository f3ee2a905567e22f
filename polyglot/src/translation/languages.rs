use std::fmt;

use serde::Serialize;

pub const DEFAULT_TARGET_LANGUAGE: &str = "hi";

/// Display names offered to clients, with the provider code for each.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("English", "en"),
    ("Hindi", "hi"),
    ("Marathi", "mr"),
    ("Tamil", "ta"),
    ("Telugu", "te"),
    ("Kannada", "kn"),
    ("Gujarati", "gu"),
    ("Punjabi", "pa"),
    ("Malayalam", "ml"),
    ("Bengali", "bn"),
    ("Odia", "or"),
    ("Assamese", "as"),
    ("Urdu", "ur"),
    ("Chinese", "zh"),
    ("Japanese", "ja"),
    ("Spanish", "es"),
];

#[derive(Debug, Clone, Serialize)]
pub struct LanguageEntry {
    pub name: &'static str,
    pub code: &'static str,
}

pub fn supported_languages() -> Vec<LanguageEntry> {
    LANGUAGES
        .iter()
        .map(|&(name, code)| LanguageEntry { name, code })
        .collect()
}

pub fn code_for_name(name: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(display, _)| display.eq_ignore_ascii_case(name))
        .map(|&(_, code)| code)
}

/// Language code the text is translated into.
///
/// Never empty. Codes other than those in [`LANGUAGES`] are passed through for
/// the provider to accept or reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLanguage(String);

impl TargetLanguage {
    /// Resolve a client-supplied value, falling back to `default` when it is
    /// missing or blank. Display names such as `Tamil` map to their code.
    pub fn parse(raw: Option<&str>, default: &str) -> Self {
        let chosen = raw
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| Some(default.trim()).filter(|v| !v.is_empty()))
            .unwrap_or(DEFAULT_TARGET_LANGUAGE);

        match code_for_name(chosen) {
            Some(code) => Self(code.to_string()),
            None => Self(chosen.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl Default for TargetLanguage {
    fn default() -> Self {
        Self(DEFAULT_TARGET_LANGUAGE.to_string())
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
