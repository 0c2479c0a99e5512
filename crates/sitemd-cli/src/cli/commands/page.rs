//! `sitemd page` – save one page interactively.

use anyhow::{Context, Result};
use sitemd_core::config::SitemdConfig;
use sitemd_core::crawl::{HttpCrawler, HttpCrawlerOptions};
use sitemd_core::pipeline::{run_single_page, SinglePageOutcome};
use sitemd_core::prompt::StdioPrompter;

pub async fn run_page(cfg: &SitemdConfig, quiet: bool) -> Result<()> {
    let crawler = HttpCrawler::new(HttpCrawlerOptions::from_config(cfg))?;

    let outcome = tokio::task::spawn_blocking(move || {
        let mut prompter = StdioPrompter;
        run_single_page(&crawler, &mut prompter, !quiet)
    })
    .await
    .context("page task panicked")?
    .context("failed to read answer from stdin")?;

    tracing::debug!(?outcome, "single-page session ended");
    if let SinglePageOutcome::Saved(path) = outcome {
        tracing::info!(path = %path.display(), "page saved");
    }
    Ok(())
}
