//! Output model structs for generated pages and build results.

use crate::publication::{PublicationConfig, PublicationSummary};
use crate::select::Catalogue;
use serde::Serialize;

/// One page ready for templating
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPage {
    /// Catalogue name, also used as the page title
    pub name: String,
    pub html_file_name: String,
    /// HTML fragment after link rewriting and markdown rendering
    pub rendered_body: String,
}

/// A page that could not be produced; other pages are unaffected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageFailure {
    pub name: String,
    pub message: String,
}

/// Result of a full build
#[derive(Debug, Clone)]
pub struct SiteIndex {
    pub publication: PublicationConfig,
    pub catalogue: Catalogue,
    pub pages: Vec<GeneratedPage>,
    pub failures: Vec<PageFailure>,
}

impl SiteIndex {
    pub fn find_by_name(&self, name: &str) -> Option<&GeneratedPage> {
        self.pages.iter().find(|p| p.name == name)
    }

    pub fn index_page(&self) -> Option<&GeneratedPage> {
        self.find_by_name(&self.publication.index)
    }
}

/// A page that a build would generate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedPage {
    pub name: String,
    pub key: String,
    pub html_file_name: String,
}

/// Dry-run view of a build: resolved settings and the pages to publish
#[derive(Debug, Clone, Serialize)]
pub struct SitePlan {
    pub config_page_found: bool,
    pub publication: PublicationSummary,
    pub pages: Vec<PlannedPage>,
}
