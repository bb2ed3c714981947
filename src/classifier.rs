// WHY: character classification as pure predicates over compiled stateless
// regexes; no matcher carries position state between calls

use regex_automata::meta::Regex;

use crate::config::{ConfigError, LanguageConfig, NonAlphaKind};

/// Compiled character-class tables for the configured language set
///
/// Every predicate is a plain `is_match` over an immutable input; the compiled
/// patterns are safe for concurrent readers.
#[derive(Debug)]
pub struct CharacterClassifier {
    target: Regex,
    base: Regex,
    number: Regex,
    special: Regex,
    target_code: String,
}

impl CharacterClassifier {
    /// Compile all character classes, validating the tables up front
    /// WHY: missing codes or bad patterns must fail before any text is seen
    pub fn compile(config: &LanguageConfig) -> Result<Self, ConfigError> {
        let target_pattern = config
            .language_pattern(&config.target_language)
            .ok_or_else(|| {
                ConfigError::UnknownTargetLanguage(config.target_language.clone())
            })?;
        let base_pattern = config
            .language_pattern(&config.base_language)
            .ok_or_else(|| ConfigError::UnknownBaseLanguage(config.base_language.clone()))?;
        let number_pattern = config
            .non_alpha_pattern(NonAlphaKind::Number)
            .ok_or(ConfigError::MissingNonAlphaClass(NonAlphaKind::Number))?;
        let special_pattern = config
            .non_alpha_pattern(NonAlphaKind::Special)
            .ok_or(ConfigError::MissingNonAlphaClass(NonAlphaKind::Special))?;

        Ok(Self {
            target: compile_class(&config.target_language, target_pattern)?,
            base: compile_class(&config.base_language, base_pattern)?,
            number: compile_class("number", number_pattern)?,
            special: compile_class("special", special_pattern)?,
            target_code: config.target_language.clone(),
        })
    }

    /// Code of the language whose runs get wrapped
    pub fn target_code(&self) -> &str {
        &self.target_code
    }

    /// True iff the text contains at least one target-language token
    pub fn contains_target(&self, text: &str) -> bool {
        self.target.is_match(text)
    }

    /// True iff the text is digits and/or punctuation with no base-language
    /// letters
    ///
    /// The conjunction matters: a token containing base-language letters is
    /// never pure punctuation, even when digits or symbols are also present.
    pub fn is_non_alpha_only(&self, text: &str) -> bool {
        (self.number.is_match(text) || self.special.is_match(text))
            && !self.base.is_match(text)
    }

    /// True iff the text matches the numeric class
    /// WHY: only numeric content receives the legacy directional override
    pub fn is_numeric(&self, text: &str) -> bool {
        self.number.is_match(text)
    }

    /// Iterate over the byte ranges of all target-language tokens, left to
    /// right and non-overlapping
    pub fn target_runs<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = std::ops::Range<usize>> + 'a {
        self.target.find_iter(text).map(|m| m.range())
    }
}

fn compile_class(code: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        code: code.to_string(),
        source,
    })
}
