//! Plan command implementation.

use anyhow::{Context, Result};
use outsite_core::{SiteBuilder, SiteConfig};

/// Print the resolved publication settings and the pages a build would write
pub fn show_plan(config: SiteConfig, json: bool) -> Result<()> {
    let builder = SiteBuilder::new(config);
    let source = builder.open_source().context("Failed to open export")?;
    let plan = builder
        .plan_from(&source)
        .context("Failed to resolve publication settings")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if !plan.config_page_found {
        println!(
            "No configuration page ({}); using defaults",
            builder.config().config_page
        );
    }
    println!("Index page: {}", plan.publication.index);
    if !plan.publication.title_rules.is_empty() {
        println!("Title rules: {}", plan.publication.title_rules.join(", "));
        println!("Content rules: {}", plan.publication.content_rules.join(", "));
    }

    println!("{} page(s):", plan.pages.len());
    for page in &plan.pages {
        println!("  {} -> {}", page.name, page.html_file_name);
    }

    Ok(())
}
