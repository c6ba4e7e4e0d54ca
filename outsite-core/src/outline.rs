//! Indented bullet outline parsing.
//!
//! An outline document conveys its structure purely through a `"- "` bullet
//! marker and the whitespace in front of it. Every four characters before the
//! marker count as one level of nesting.

use serde::Serialize;
use thiserror::Error;

/// The bullet marker that precedes the text of every outline line.
pub const BULLET_MARKER: &str = "- ";

/// Number of leading characters that make up one indentation level.
pub const INDENT_WIDTH: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutlineError {
    #[error("Malformed outline at line {line}: {reason}")]
    MalformedOutline { line: usize, reason: String },
}

/// One bullet of an outline together with its nested bullets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Node {
    pub text: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// First child, the argument of a directive node
    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    /// Directive comparison key: trimmed and upper-cased text
    pub fn directive(&self) -> String {
        self.text.trim().to_uppercase()
    }

    /// Depth-first listing of `(depth, text)` pairs, starting at depth 0
    pub fn flatten(&self) -> Vec<(usize, &str)> {
        let mut out = Vec::new();
        self.flatten_into(0, &mut out);
        out
    }

    fn flatten_into<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a str)>) {
        out.push((depth, self.text.as_str()));
        for child in &self.children {
            child.flatten_into(depth + 1, out);
        }
    }
}

/// Depth-first listing of a whole forest
pub fn flatten_forest(forest: &[Node]) -> Vec<(usize, &str)> {
    forest.iter().flat_map(Node::flatten).collect()
}

/// Find the first top-level node whose directive text equals `name`.
pub fn find_directive<'a>(forest: &'a [Node], name: &str) -> Option<&'a Node> {
    forest.iter().find(|node| node.directive() == name)
}

/// Parse outline lines into the top-level forest.
///
/// The parser keeps a stack of open ancestors, `stack[0]` being a virtual
/// root. Before a line at indent `n` is attached the stack is cut back to
/// `n + 1` entries, so its top is always the parent of the new node. A line
/// that would need a parent deeper than the stack has is malformed.
pub fn parse_outline<I, S>(lines: I) -> Result<Vec<Node>, OutlineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stack: Vec<Node> = vec![Node::default()];

    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        let line_no = idx + 1;

        let Some(offset) = line.find(BULLET_MARKER) else {
            return Err(OutlineError::MalformedOutline {
                line: line_no,
                reason: format!("missing bullet marker in {:?}", line),
            });
        };

        let indent = line[..offset].chars().count() / INDENT_WIDTH;
        let text = &line[offset + BULLET_MARKER.len()..];

        if indent + 1 > stack.len() {
            return Err(OutlineError::MalformedOutline {
                line: line_no,
                reason: format!(
                    "indent level {} has no parent (deepest open level is {})",
                    indent,
                    stack.len() - 1
                ),
            });
        }

        close_until(&mut stack, indent + 1);
        stack.push(Node::new(text));
    }

    close_until(&mut stack, 1);
    let root = stack.pop().unwrap_or_default();
    Ok(root.children)
}

/// Parse a full document body, ignoring blank lines.
pub fn parse_outline_str(body: &str) -> Result<Vec<Node>, OutlineError> {
    parse_outline(body.lines().filter(|line| !line.trim().is_empty()))
}

/// Pop open nodes into their parents until `len` entries remain.
fn close_until(stack: &mut Vec<Node>, len: usize) {
    while stack.len() > len {
        if let Some(node) = stack.pop() {
            if let Some(parent) = stack.last_mut() {
                parent.children.push(node);
            }
        }
    }
}
