// WHY: digits and punctuation carry no script direction; attaching them to
// the nearest wrapped run (preferring the preceding one) avoids direction
// flips at run boundaries

use tracing::{debug, warn};

use crate::classifier::CharacterClassifier;
use crate::markup::{parse_children, Node};

/// Post-processes the child-node view of a wrapped fragment, merging
/// non-alpha text children into neighboring units
#[derive(Debug)]
pub struct NumberAdjuster {
    legacy_quirks: bool,
}

impl NumberAdjuster {
    pub fn new(legacy_quirks: bool) -> Self {
        Self { legacy_quirks }
    }

    /// Re-attach numeric/punctuation text children of a wrapped fragment
    ///
    /// Attachment order: append to the previously emitted unit, else prepend
    /// into the following sibling, else emit standalone. Whitespace-only text
    /// children are dropped; remaining units join with a single space.
    ///
    /// A fragment that fails to reparse passes through unmodified with a
    /// diagnostic; one bad fragment must not abort the transform.
    pub fn adjust(&self, wrapped: &str, classifier: &CharacterClassifier) -> String {
        let mut nodes = match parse_children(wrapped) {
            Ok(nodes) => nodes,
            Err(err) => {
                warn!("Fragment passed through unmodified: {err}");
                return wrapped.to_string();
            }
        };

        let mut units: Vec<String> = Vec::new();

        for index in 0..nodes.len() {
            match nodes[index].clone() {
                Node::Wrap { .. } => units.push(nodes[index].render()),
                Node::Text(text) => {
                    if text.trim().is_empty() {
                        // Dropped, but the join space preserves adjacency
                        continue;
                    }
                    if !classifier.is_non_alpha_only(&text) {
                        units.push(text);
                        continue;
                    }

                    let corrected = self.number_override(&text, classifier);
                    if let Some(prior) = units.last_mut() {
                        append_to_unit(prior, &corrected);
                    } else if index + 1 < nodes.len() {
                        prepend_to_node(&mut nodes[index + 1], &corrected);
                    } else {
                        units.push(corrected);
                    }
                }
            }
        }

        let adjusted = units.join(" ");
        debug!(
            "Adjusted fragment: {} children -> {} units",
            nodes.len(),
            units.len()
        );
        adjusted
    }

    /// Wrap numeric content in an explicit left-to-right span on legacy
    /// rendering engines; everywhere else the content passes through
    fn number_override(&self, text: &str, classifier: &CharacterClassifier) -> String {
        if self.legacy_quirks && classifier.is_numeric(text) {
            format!("&nbsp;<span dir=\"ltr\">{text}</span>&nbsp;")
        } else {
            text.to_string()
        }
    }
}

/// Merge content into the end of an already-emitted unit
fn append_to_unit(unit: &mut String, content: &str) {
    if let Some(body) = unit.strip_suffix(crate::markup::WRAP_CLOSE) {
        // Element unit: the content joins the run inside the wrapper
        *unit = format!("{body}{content}{}", crate::markup::WRAP_CLOSE);
    } else {
        unit.push_str(content);
    }
}

/// Merge content into the start of the following sibling
fn prepend_to_node(node: &mut Node, content: &str) {
    match node {
        Node::Wrap { inner, .. } => *inner = format!("{content}{inner}"),
        Node::Text(text) => *text = format!("{content}{text}"),
    }
}
