// WHY: one compiled, read-only engine per configuration; every transform is a
// pure function of the input fragment with no cross-call scratch state

use regex_automata::meta::Regex;
use tracing::{debug, info};

use crate::adjuster::NumberAdjuster;
use crate::classifier::CharacterClassifier;
use crate::config::{ConfigError, LanguageConfig};
use crate::markup::WRAP_CLOSE;
use crate::normalizer::BoundaryNormalizer;

/// Compiled run-wrapping engine
///
/// Construction validates the configuration and compiles every character
/// class and merge pattern; `transform` is then infallible and safe to call
/// from concurrent readers.
#[derive(Debug)]
pub struct RunWrapEngine {
    classifier: CharacterClassifier,
    adjuster: NumberAdjuster,
    normalizer: BoundaryNormalizer,
    /// Matches any whitespace-delimited token containing a slash
    compound: Regex,
    open_tag: String,
}

impl RunWrapEngine {
    pub fn new(config: &LanguageConfig) -> Result<Self, ConfigError> {
        let classifier = CharacterClassifier::compile(config)?;
        let normalizer = BoundaryNormalizer::new(config.legacy_quirks)?;
        let compound =
            Regex::new(r"\S*/+\S*").map_err(|source| ConfigError::InvalidPattern {
                code: "compound".to_string(),
                source,
            })?;

        // Legacy engines mishandle dir="auto"; force explicit direction there
        let dir = if config.legacy_quirks { "rtl" } else { "auto" };
        let open_tag = format!(
            "<wrap dir=\"{dir}\" lang=\"{}\">",
            config.target_language
        );

        info!(
            "Compiled run-wrap engine: target '{}', dir '{}', legacy quirks {}",
            config.target_language, dir, config.legacy_quirks
        );

        Ok(Self {
            classifier,
            adjuster: NumberAdjuster::new(config.legacy_quirks),
            normalizer,
            compound,
            open_tag,
        })
    }

    /// Transform one text fragment, wrapping every target-language run
    ///
    /// Fragments without target-language content pass through unchanged.
    pub fn transform(&self, fragment: &str) -> String {
        if !self.classifier.contains_target(fragment) {
            return fragment.to_string();
        }
        let wrapped = self.wrap_fragment(fragment);
        self.normalizer.normalize(&wrapped)
    }

    /// Split slash-joined compounds before wrapping
    ///
    /// Splitting only pays off when the sub-tokens differ in kind: if every
    /// sub-token is fully target-language or fully non-alpha, the fragment is
    /// wrapped as a single unit. The split is flat (every slash at once) and
    /// the rejoin exactly reverses it.
    fn wrap_fragment(&self, fragment: &str) -> String {
        if !self.compound.is_match(fragment) {
            return self.wrap_runs(fragment);
        }

        let sub_tokens: Vec<&str> = fragment.split('/').collect();
        let homogeneous = sub_tokens
            .iter()
            .filter(|token| {
                self.classifier.contains_target(token)
                    || self.classifier.is_non_alpha_only(token)
            })
            .count();

        if homogeneous == sub_tokens.len() {
            return self.wrap_runs(fragment);
        }

        debug!(
            "Splitting compound fragment into {} sub-tokens",
            sub_tokens.len()
        );
        let wrapped: Vec<String> = sub_tokens
            .iter()
            .map(|token| {
                if self.classifier.contains_target(token) {
                    self.wrap_runs(token)
                } else {
                    (*token).to_string()
                }
            })
            .collect();
        wrapped.join("/")
    }

    /// Wrap every maximal target-language token, then re-attach numeric and
    /// punctuation neighbors
    fn wrap_runs(&self, text: &str) -> String {
        let mut wrapped = String::with_capacity(text.len() + self.open_tag.len());
        let mut last_end = 0;
        for run in self.classifier.target_runs(text) {
            wrapped.push_str(&text[last_end..run.start]);
            wrapped.push_str(&self.open_tag);
            wrapped.push_str(&text[run.clone()]);
            wrapped.push_str(WRAP_CLOSE);
            last_end = run.end;
        }
        wrapped.push_str(&text[last_end..]);

        // Numeric adjustment is defined on the wrapped structure
        self.adjuster.adjust(&wrapped, &self.classifier)
    }
}

/// Single-call convenience entry point: validate the configuration and
/// transform one fragment
pub fn transform(fragment: &str, config: &LanguageConfig) -> Result<String, ConfigError> {
    let engine = RunWrapEngine::new(config)?;
    Ok(engine.transform(fragment))
}
