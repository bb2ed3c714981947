// WHY: minimal structural view over wrapper markup so numeric attachment can
// reason about text vs. element children instead of raw characters

use thiserror::Error;

pub const WRAP_OPEN_PREFIX: &str = "<wrap";
pub const WRAP_CLOSE: &str = "</wrap>";

/// Recoverable reparse failure: unbalanced wrapper markup in a fragment
/// WHY: one bad fragment must not abort the surrounding transform
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unbalanced wrapper markup in fragment")]
pub struct MalformedMarkup;

/// One top-level child of a wrapped fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Plain text between wrapper elements, whitespace preserved
    Text(String),
    /// A wrapper element split into its opening tag and inner content
    Wrap { open_tag: String, inner: String },
}

impl Node {
    pub fn render(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Wrap { open_tag, inner } => format!("{open_tag}{inner}{WRAP_CLOSE}"),
        }
    }

    pub fn is_wrap(&self) -> bool {
        matches!(self, Node::Wrap { .. })
    }
}

/// Parse a wrapped fragment into its ordered top-level children
///
/// Wrapper elements never nest (runs do not overlap), so an element spans
/// from its opening tag to the next closing tag. A dangling opening tag or a
/// stray closing tag is malformed.
pub fn parse_children(fragment: &str) -> Result<Vec<Node>, MalformedMarkup> {
    let mut nodes = Vec::new();
    let mut rest = fragment;
    let mut text = String::new();

    while !rest.is_empty() {
        match rest.find('<') {
            None => {
                text.push_str(rest);
                rest = "";
            }
            Some(pos) => {
                text.push_str(&rest[..pos]);
                rest = &rest[pos..];

                if rest.starts_with(WRAP_CLOSE) {
                    // Closing tag with no matching opener
                    return Err(MalformedMarkup);
                }
                if is_wrap_open(rest) {
                    let tag_end = rest.find('>').ok_or(MalformedMarkup)?;
                    let open_tag = rest[..=tag_end].to_string();
                    let after_open = &rest[tag_end + 1..];
                    let close = after_open.find(WRAP_CLOSE).ok_or(MalformedMarkup)?;

                    if !text.is_empty() {
                        nodes.push(Node::Text(std::mem::take(&mut text)));
                    }
                    nodes.push(Node::Wrap {
                        open_tag,
                        inner: after_open[..close].to_string(),
                    });
                    rest = &after_open[close + WRAP_CLOSE.len()..];
                } else {
                    // A '<' that starts no wrapper tag is ordinary text
                    text.push('<');
                    rest = &rest[1..];
                }
            }
        }
    }

    if !text.is_empty() {
        nodes.push(Node::Text(text));
    }
    Ok(nodes)
}

fn is_wrap_open(rest: &str) -> bool {
    rest.strip_prefix(WRAP_OPEN_PREFIX)
        .and_then(|after| after.chars().next())
        .map(|ch| ch == ' ' || ch == '>')
        .unwrap_or(false)
}
