//! Publication settings derived from the reserved configuration page.
//!
//! The configuration page is an ordinary outline document:
//!
//! ```text
//! - Index
//!     - Home
//! - Filter
//!     - STARTS WITH
//!         - Blog/
//!     - TAGGED WITH
//!         - Public
//! ```

use crate::outline::{find_directive, parse_outline_str, Node, OutlineError};
use crate::rules::{compile_content_rule, compile_title_rule, ContentRule, TitleRule};
use crate::source::RawDocument;
use serde::Serialize;

/// Title used for the home page when the configuration does not name one
pub const DEFAULT_INDEX: &str = "Website Index";

/// Key of the configuration page inside an export
pub const DEFAULT_CONFIG_KEY: &str = "roam/js/static-site.md";

pub const INDEX_DIRECTIVE: &str = "INDEX";
pub const FILTER_DIRECTIVE: &str = "FILTER";

/// Title predicate: the index page, or any of the compiled rules.
///
/// An empty rule list accepts everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleFilter {
    index: String,
    rules: Vec<TitleRule>,
}

impl TitleFilter {
    pub fn new(index: impl Into<String>, rules: Vec<TitleRule>) -> Self {
        Self {
            index: index.into(),
            rules,
        }
    }

    pub fn accepts(&self, title: &str) -> bool {
        self.rules.is_empty() || title == self.index || self.rules.iter().any(|r| r.matches(title))
    }

    pub fn rules(&self) -> &[TitleRule] {
        &self.rules
    }
}

/// Content predicate: any of the compiled rules; an empty list accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    rules: Vec<ContentRule>,
}

impl ContentFilter {
    pub fn new(rules: Vec<ContentRule>) -> Self {
        Self { rules }
    }

    pub fn accepts(&self, body: &str) -> bool {
        self.rules.is_empty() || self.rules.iter().any(|r| r.matches(body))
    }

    pub fn rules(&self) -> &[ContentRule] {
        &self.rules
    }
}

/// Effective publication settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationConfig {
    pub index: String,
    pub title_filter: TitleFilter,
    pub content_filter: ContentFilter,
}

impl Default for PublicationConfig {
    fn default() -> Self {
        Self {
            index: DEFAULT_INDEX.to_string(),
            title_filter: TitleFilter::new(DEFAULT_INDEX, Vec::new()),
            content_filter: ContentFilter::default(),
        }
    }
}

/// Human-readable view of a resolved configuration
#[derive(Debug, Clone, Serialize)]
pub struct PublicationSummary {
    pub index: String,
    pub title_rules: Vec<String>,
    pub content_rules: Vec<String>,
}

impl PublicationConfig {
    pub fn summary(&self) -> PublicationSummary {
        PublicationSummary {
            index: self.index.clone(),
            title_rules: self
                .title_filter
                .rules()
                .iter()
                .map(|r| match r {
                    TitleRule::StartsWith(prefix) => format!("starts with {prefix:?}"),
                    TitleRule::Always => "always".to_string(),
                })
                .collect(),
            content_rules: self
                .content_filter
                .rules()
                .iter()
                .map(|r| match r {
                    ContentRule::TaggedWith(tag) => format!("tagged with {tag:?}"),
                    ContentRule::Always => "always".to_string(),
                })
                .collect(),
        }
    }
}

/// Derive the publication settings from the configuration page, if any.
///
/// A configuration page that is not a well-formed outline is an error: a
/// half-read filter would publish the wrong set of pages.
pub fn resolve(config_document: Option<&RawDocument>) -> Result<PublicationConfig, OutlineError> {
    let Some(document) = config_document else {
        tracing::info!("No configuration page found; publishing with defaults");
        return Ok(PublicationConfig::default());
    };

    let forest = parse_outline_str(&document.body)?;
    Ok(resolve_forest(&forest))
}

/// Derive the publication settings from an already parsed configuration outline
pub fn resolve_forest(forest: &[Node]) -> PublicationConfig {
    let index = find_directive(forest, INDEX_DIRECTIVE)
        .and_then(Node::first_child)
        .map(|child| child.text.trim().to_string())
        .unwrap_or_else(|| DEFAULT_INDEX.to_string());

    let filters = find_directive(forest, FILTER_DIRECTIVE).filter(|f| !f.children.is_empty());

    let (title_rules, content_rules) = match filters {
        Some(filter) => (
            filter.children.iter().map(compile_title_rule).collect(),
            filter.children.iter().map(compile_content_rule).collect(),
        ),
        None => (Vec::new(), Vec::new()),
    };

    tracing::debug!(
        "Resolved index {:?} with {} filter rule(s)",
        index,
        filters.map_or(0, |f| f.children.len())
    );

    PublicationConfig {
        title_filter: TitleFilter::new(index.clone(), title_rules),
        content_filter: ContentFilter::new(content_rules),
        index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_doc(body: &str) -> RawDocument {
        RawDocument {
            key: DEFAULT_CONFIG_KEY.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_defaults_without_config_page() {
        let config = resolve(None).unwrap();
        assert_eq!(config.index, "Website Index");
        assert!(config.title_filter.accepts("anything at all"));
        assert!(config.title_filter.accepts(""));
        assert!(config.content_filter.accepts("whatever"));
    }

    #[test]
    fn test_index_from_config() {
        let config = resolve(Some(&config_doc("- index\n    -  Home Page \n"))).unwrap();
        assert_eq!(config.index, "Home Page");
        assert!(config.title_filter.accepts("Other"));
    }

    #[test]
    fn test_index_without_child_keeps_default() {
        let config = resolve(Some(&config_doc("- INDEX\n- Something"))).unwrap();
        assert_eq!(config.index, DEFAULT_INDEX);
    }

    #[test]
    fn test_title_filter_always_includes_index() {
        let body = "- Index\n    - Home\n- Filter\n    - STARTS WITH\n        - Blog/\n";
        let config = resolve(Some(&config_doc(body))).unwrap();

        assert!(config.title_filter.accepts("Home"));
        assert!(config.title_filter.accepts("Blog/Hello"));
        assert!(!config.title_filter.accepts("Private"));
        // Starts-with nodes compile to permissive content rules
        assert!(config.content_filter.accepts("anything"));
    }

    #[test]
    fn test_content_filter_or_of_rules() {
        let body = "- FILTER\n    - TAGGED WITH\n        - Public\n    - TAGGED WITH\n        - Shared\n";
        let config = resolve(Some(&config_doc(body))).unwrap();

        assert!(config.content_filter.accepts("- note #Public"));
        assert!(config.content_filter.accepts("Shared:: true"));
        assert!(!config.content_filter.accepts("- private note"));
        // Tagged-with nodes compile to permissive title rules
        assert!(config.title_filter.accepts("Any Title"));
    }

    #[test]
    fn test_mixed_filter_fails_open() {
        let body = "- Filter\n    - STARTS WITH\n        - Blog/\n    - TAGGED WITH\n        - Public\n";
        let config = resolve(Some(&config_doc(body))).unwrap();

        assert!(config.title_filter.accepts("Private"));
        assert!(config.content_filter.accepts("no tags here"));
    }

    #[test]
    fn test_empty_filter_accepts_all() {
        let config = resolve(Some(&config_doc("- Filter\n- Index\n    - Home"))).unwrap();
        assert!(config.title_filter.accepts("x"));
        assert!(config.content_filter.accepts("y"));
    }

    #[test]
    fn test_malformed_config_is_fatal() {
        let err = resolve(Some(&config_doc("    - Index\n- Home"))).unwrap_err();
        assert!(matches!(err, OutlineError::MalformedOutline { line: 1, .. }));
    }

    #[test]
    fn test_summary_lists_rules() {
        let body = "- Filter\n    - STARTS WITH\n        - Blog/\n";
        let summary = resolve(Some(&config_doc(body))).unwrap().summary();
        assert_eq!(summary.title_rules, vec!["starts with \"Blog/\""]);
        assert_eq!(summary.content_rules, vec!["always"]);
    }
}
