//! Build command implementation.

use anyhow::{Context, Result};
use askama::Template;
use outsite_core::{GeneratedPage, SiteBuilder, SiteConfig};
use outsite_render::PageTemplate;
use std::fs;

/// Build the static site and write one HTML file per page
pub fn build_site(config: SiteConfig) -> Result<()> {
    let export_dir = config.export_dir();
    tracing::info!("Building site from {:?}", export_dir);

    let builder = SiteBuilder::new(config.clone());
    let site_index = builder.build().context("Failed to build site")?;

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    let base_url = config.normalized_base_url();
    let mut written = 0usize;
    let mut skipped = site_index.failures.len();

    for failure in &site_index.failures {
        tracing::warn!("Skipped {:?}: {}", failure.name, failure.message);
    }

    for page in &site_index.pages {
        let is_index = page.name == site_index.publication.index;
        let html = match render_page(&config, page, &base_url, is_index) {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!("Failed to render {:?}: {:#}", page.name, err);
                skipped += 1;
                continue;
            }
        };

        let output_path = output_dir.join(&page.html_file_name);
        fs::write(&output_path, html)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        written += 1;

        tracing::debug!("Wrote: {}", page.html_file_name);
    }

    tracing::info!("✓ Built {} pages", written);
    if skipped > 0 {
        tracing::warn!("{} page(s) skipped", skipped);
    }
    tracing::info!("✓ Output written to {:?}", output_dir);

    Ok(())
}

/// Wrap one page in the site template
fn render_page(
    config: &SiteConfig,
    page: &GeneratedPage,
    base_url: &str,
    is_index: bool,
) -> Result<String> {
    let template = PageTemplate {
        title: page.name.clone(),
        content: page.rendered_body.clone(),
        site_title: config.site.title.clone(),
        home: base_url.to_string(),
        is_index,
    };

    template
        .render()
        .context("Failed to render page template")
}
