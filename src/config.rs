// WHY: single read-only configuration object validated before any text is
// processed, so the wrapping passes never need to handle missing tables

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// One recognized language: a code plus the character-class pattern that
/// matches a whitespace-delimited token containing that script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageSpec {
    pub code: String,
    pub pattern: String,
}

/// Classification of non-alphabetic token classes
/// WHY: numbers receive a directional override, generic punctuation does not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NonAlphaKind {
    Number,
    Special,
}

impl std::fmt::Display for NonAlphaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NonAlphaKind::Number => write!(f, "number"),
            NonAlphaKind::Special => write!(f, "special"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonAlphaSpec {
    pub kind: NonAlphaKind,
    pub pattern: String,
}

/// Process-wide engine configuration: language tables, the designated target
/// language, and the legacy-quirks capability flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Language whose runs receive directional wrappers
    pub target_language: String,
    /// Reference language used to exclude alphabetic content from the
    /// non-alpha-only classification
    #[serde(default = "default_base_language")]
    pub base_language: String,
    pub languages: Vec<LanguageSpec>,
    pub non_alpha: Vec<NonAlphaSpec>,
    /// Host rendering engine mishandles dir="auto" and needs explicit
    /// direction plus non-breaking-space handling around numbers
    #[serde(default)]
    pub legacy_quirks: bool,
}

fn default_base_language() -> String {
    "en".to_string()
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            target_language: "he".to_string(),
            base_language: "en".to_string(),
            languages: vec![
                LanguageSpec {
                    code: "en".to_string(),
                    pattern: r"\S*[A-Za-z]+\S*".to_string(),
                },
                LanguageSpec {
                    code: "he".to_string(),
                    pattern: r"\S*[\u{0590}-\u{05FF}]+\S*".to_string(),
                },
            ],
            non_alpha: vec![
                NonAlphaSpec {
                    kind: NonAlphaKind::Number,
                    pattern: r"\S*[0-9]+\S*".to_string(),
                },
                NonAlphaSpec {
                    kind: NonAlphaKind::Special,
                    pattern: r"\S*[;.,?/!\-\u{2014}]+\S*".to_string(),
                },
            ],
            legacy_quirks: false,
        }
    }
}

impl LanguageConfig {
    /// Default tables with a different target language
    pub fn for_target(code: &str) -> Self {
        Self {
            target_language: code.to_string(),
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: LanguageConfig = serde_json::from_str(&contents)?;
        info!(
            "Loaded language config from {}: {} languages, target '{}'",
            path.display(),
            config.languages.len(),
            config.target_language
        );
        Ok(config)
    }

    pub fn language_pattern(&self, code: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|spec| spec.code == code)
            .map(|spec| spec.pattern.as_str())
    }

    pub fn non_alpha_pattern(&self, kind: NonAlphaKind) -> Option<&str> {
        self.non_alpha
            .iter()
            .find(|spec| spec.kind == kind)
            .map(|spec| spec.pattern.as_str())
    }
}

/// Fatal configuration failures, surfaced at engine construction before any
/// fragment is processed
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("target language '{0}' not present in the language table")]
    UnknownTargetLanguage(String),

    #[error("base language '{0}' not present in the language table")]
    UnknownBaseLanguage(String),

    #[error("non-alpha class '{0}' missing its pattern")]
    MissingNonAlphaClass(NonAlphaKind),

    #[error("invalid character class for '{code}': {source}")]
    InvalidPattern {
        code: String,
        #[source]
        source: regex_automata::meta::BuildError,
    },
}
