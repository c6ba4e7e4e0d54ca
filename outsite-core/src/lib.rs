//! # outsite-core
//!
//! Core library for the outsite outline-to-website generator.
//!
//! This crate turns an exported set of outline documents into rendered
//! pages: it parses the configuration page, selects the pages to publish,
//! rewrites cross-references into links and renders markdown to HTML.

pub mod builder;
pub mod config;
pub mod filename;
pub mod links;
pub mod markdown;
pub mod models;
pub mod outline;
pub mod publication;
pub mod rules;
pub mod select;
pub mod source;

pub use builder::{BuildError, SiteBuilder};
pub use config::SiteConfig;
pub use filename::{page_name, to_file_name};
pub use links::{rewrite_links, LinkRewriter};
pub use markdown::MarkdownProcessor;
pub use models::{GeneratedPage, PageFailure, PlannedPage, SiteIndex, SitePlan};
pub use outline::{parse_outline, parse_outline_str, Node, OutlineError};
pub use publication::{resolve, PublicationConfig, DEFAULT_CONFIG_KEY, DEFAULT_INDEX};
pub use rules::{compile_content_rule, compile_title_rule, ContentRule, TitleRule};
pub use select::{select, select_with, Catalogue, Selection};
pub use source::{DirectorySource, DocumentSource, MemorySource, RawDocument, SourceError};
