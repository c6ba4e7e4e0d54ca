//! Filter directives compiled from outline nodes.
//!
//! A directive is a node whose text names the rule (`STARTS WITH`,
//! `TAGGED WITH`) and whose first child carries the argument. Anything the
//! compiler does not recognize becomes a rule that accepts everything.

use crate::outline::Node;

pub const STARTS_WITH: &str = "STARTS WITH";
pub const TAGGED_WITH: &str = "TAGGED WITH";

/// Predicate over a page title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleRule {
    StartsWith(String),
    Always,
}

impl TitleRule {
    pub fn matches(&self, title: &str) -> bool {
        match self {
            TitleRule::StartsWith(prefix) => title.starts_with(prefix.as_str()),
            TitleRule::Always => true,
        }
    }
}

/// Predicate over a page body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRule {
    TaggedWith(String),
    Always,
}

impl ContentRule {
    pub fn matches(&self, body: &str) -> bool {
        match self {
            ContentRule::TaggedWith(tag) => tag_renderings(tag)
                .iter()
                .any(|rendering| body.contains(rendering.as_str())),
            ContentRule::Always => true,
        }
    }
}

/// The three ways a page can carry a tag: `#X`, `[[X]]` and `X::`.
pub fn tag_renderings(tag: &str) -> [String; 3] {
    [format!("#{tag}"), format!("[[{tag}]]"), format!("{tag}::")]
}

pub fn compile_title_rule(node: &Node) -> TitleRule {
    match argument(node, STARTS_WITH) {
        Some(prefix) => TitleRule::StartsWith(prefix.to_string()),
        None => TitleRule::Always,
    }
}

pub fn compile_content_rule(node: &Node) -> ContentRule {
    match argument(node, TAGGED_WITH) {
        Some(tag) => ContentRule::TaggedWith(tag.to_string()),
        None => ContentRule::Always,
    }
}

/// Argument text of `node` when it is the `directive` with a child.
fn argument<'a>(node: &'a Node, directive: &str) -> Option<&'a str> {
    if node.directive() != directive {
        return None;
    }
    match node.first_child() {
        Some(child) => Some(child.text.as_str()),
        None => {
            tracing::warn!(
                "Rule '{}' has no argument; it will accept every page",
                directive
            );
            None
        }
    }
}
