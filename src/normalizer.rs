// WHY: independently wrapped adjacent runs leave tag noise at their shared
// boundary; one merge pass per pattern collapses them into a contiguous run

use regex_automata::meta::Regex;
use tracing::debug;

use crate::config::ConfigError;

/// Collapses adjacent wrapper boundaries left behind by the first wrapping
/// pass
///
/// Each pattern is applied once, in order. Upstream passes never produce
/// doubly-nested adjacency, so a single application reaches the fixed point.
#[derive(Debug)]
pub struct BoundaryNormalizer {
    adjacent: Regex,
    spaced: Regex,
    legacy_adjacent: Regex,
    legacy_spaced: Regex,
    legacy_quirks: bool,
}

impl BoundaryNormalizer {
    pub fn new(legacy_quirks: bool) -> Result<Self, ConfigError> {
        Ok(Self {
            adjacent: compile(r"</wrap><wrap[^>]*>")?,
            spaced: compile(r"</wrap>\s<wrap[^>]*>")?,
            legacy_adjacent: compile(r"</span>&nbsp;</wrap><wrap[^>]*>")?,
            legacy_spaced: compile(r"</span>&nbsp;</wrap>\s<wrap[^>]*>")?,
            legacy_quirks,
        })
    }

    /// Merge adjacent same-run wrappers in a single pass per pattern
    pub fn normalize(&self, fragment: &str) -> String {
        let mut result = replace_all(&self.adjacent, fragment, "");
        result = replace_all(&self.spaced, &result, " ");

        if self.legacy_quirks {
            // Numeric-override markup sitting at a run boundary
            result = replace_all(&self.legacy_adjacent, &result, "</span>&nbsp;");
            result = replace_all(&self.legacy_spaced, &result, "</span>&nbsp;");
        }

        if result.len() != fragment.len() {
            debug!(
                "Merged wrapper boundaries: {} -> {} bytes",
                fragment.len(),
                result.len()
            );
        }
        result
    }
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        code: "normalizer".to_string(),
        source,
    })
}

/// Replace every non-overlapping match with the given replacement
/// WHY: regex-automata exposes find iteration only; replacement is manual
fn replace_all(regex: &Regex, text: &str, replacement: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;
    for m in regex.find_iter(text) {
        result.push_str(&text[last_end..m.start()]);
        result.push_str(replacement);
        last_end = m.end();
    }
    result.push_str(&text[last_end..]);
    result
}
