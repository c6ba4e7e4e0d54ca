//! Site building logic - orchestrates configuration, selection and rendering.

use crate::{
    config::SiteConfig,
    filename::{page_name, to_file_name},
    links::{LinkError, LinkRewriter},
    markdown::MarkdownProcessor,
    models::*,
    outline::OutlineError,
    publication::{resolve, PublicationConfig},
    select::{select, Selection},
    source::{DirectorySource, DocumentSource, SourceError},
};
use rayon::prelude::*;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Invalid configuration page: {0}")]
    Configuration(#[from] OutlineError),

    #[error("Link error: {0}")]
    Links(#[from] LinkError),
}

/// Main site builder
pub struct SiteBuilder {
    config: SiteConfig,
    processor: MarkdownProcessor,
}

impl SiteBuilder {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            processor: MarkdownProcessor::new(),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Open the configured export directory
    pub fn open_source(&self) -> Result<DirectorySource, BuildError> {
        Ok(DirectorySource::open(
            &self.config.export_dir(),
            &self.config.ignore_patterns,
        )?)
    }

    /// Build every page of the configured export
    pub fn build(&self) -> Result<SiteIndex, BuildError> {
        let source = self.open_source()?;
        self.build_from(&source)
    }

    /// Build every page of `source`
    pub fn build_from(&self, source: &dyn DocumentSource) -> Result<SiteIndex, BuildError> {
        let (publication, selection) = self.prepare(source)?;

        // The catalogue must be complete before any page is rewritten
        let catalogue = selection.catalogue();
        if !catalogue.contains(&publication.index) {
            tracing::warn!(
                "Index page {:?} is not among the selected pages; no index.html will be generated",
                publication.index
            );
        }

        let rewriter = LinkRewriter::new(
            &catalogue,
            &publication.index,
            &self.config.normalized_base_url(),
        )?;

        let rendered: Vec<GeneratedPage> = selection
            .pages
            .par_iter()
            .map(|(key, body)| {
                let name = page_name(key);
                tracing::debug!("Rendering: {}", name);
                let markdown = rewriter.rewrite(body);
                GeneratedPage {
                    name: name.to_string(),
                    html_file_name: to_file_name(name, &publication.index),
                    rendered_body: self.processor.render(&markdown),
                }
            })
            .collect();

        let (pages, failures) = dedupe_file_names(rendered);

        tracing::info!("Built {} page(s)", pages.len());

        Ok(SiteIndex {
            publication,
            catalogue,
            pages,
            failures,
        })
    }

    /// Resolve settings and list the pages a build would produce, without
    /// rendering anything
    pub fn plan_from(&self, source: &dyn DocumentSource) -> Result<SitePlan, BuildError> {
        let config_page_found = source.keys().contains(&self.config.config_page);
        let (publication, selection) = self.prepare(source)?;

        let pages = selection
            .pages
            .keys()
            .map(|key| {
                let name = page_name(key);
                PlannedPage {
                    name: name.to_string(),
                    key: key.clone(),
                    html_file_name: to_file_name(name, &publication.index),
                }
            })
            .collect();

        Ok(SitePlan {
            config_page_found,
            publication: publication.summary(),
            pages,
        })
    }

    fn prepare(
        &self,
        source: &dyn DocumentSource,
    ) -> Result<(PublicationConfig, Selection), BuildError> {
        let config_page = &self.config.config_page;
        let config_document = source.get(config_page)?;
        let publication = resolve(config_document.as_ref())?;

        tracing::info!("Publishing with index page {:?}", publication.index);

        let selection = select(source, &publication, config_page)?;
        Ok((publication, selection))
    }
}

/// Keep the first page (in name order) for each output file name.
///
/// Distinct names can collide once spaces become underscores
/// (`"a b"` and `"a_b"`); the later ones are reported as failures.
fn dedupe_file_names(mut pages: Vec<GeneratedPage>) -> (Vec<GeneratedPage>, Vec<PageFailure>) {
    pages.sort_by(|a, b| a.name.cmp(&b.name));

    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(pages.len());
    let mut failures = Vec::new();

    for page in pages {
        if seen.insert(page.html_file_name.clone()) {
            kept.push(page);
        } else {
            tracing::warn!(
                "Page {:?} maps to {} which is already taken; skipping",
                page.name,
                page.html_file_name
            );
            failures.push(PageFailure {
                message: format!("output file {} is already used", page.html_file_name),
                name: page.name,
            });
        }
    }

    (kept, failures)
}
