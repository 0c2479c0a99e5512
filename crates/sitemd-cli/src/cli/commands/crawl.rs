//! `sitemd crawl` – crawl a site section and write the Markdown tree.

use anyhow::{Context, Result};
use sitemd_core::config::{ensure_output_dir, RunConfig, SitemdConfig};
use sitemd_core::crawl::{CrawlRequest, Crawler, HttpCrawler, HttpCrawlerOptions};
use sitemd_core::pipeline::{process_records, BatchSummary};
use sitemd_core::url_model::{Layout, PrefixPolicy};
use std::path::PathBuf;

/// Flag values for one crawl; `None` falls back to the config file.
#[derive(Debug, Clone)]
pub struct CrawlArgs {
    pub url: String,
    pub output_dir: PathBuf,
    pub depth: Option<usize>,
    pub quiet: bool,
    pub prefix_policy: Option<PrefixPolicy>,
    pub layout: Option<Layout>,
}

fn run_config(cfg: &SitemdConfig, args: CrawlArgs) -> RunConfig {
    let mut run = RunConfig::new(args.url, args.output_dir, cfg);
    if let Some(depth) = args.depth {
        run.max_depth = depth;
    }
    if let Some(policy) = args.prefix_policy {
        run.map.prefix_policy = policy;
    }
    if let Some(layout) = args.layout {
        run.map.layout = layout;
    }
    run.verbose = !args.quiet;
    run
}

/// How a crawl run ended once the crawler was up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlReport {
    /// The crawler failed as a whole; nothing was written.
    NoResults,
    Finished(BatchSummary),
}

pub async fn run_crawl(cfg: &SitemdConfig, args: CrawlArgs) -> Result<CrawlReport> {
    let run = run_config(cfg, args);
    let request = CrawlRequest::new(&run.start_url, run.max_depth, run.verbose)?;

    println!("--- sitemd: crawl to Markdown ---");
    println!("Starting crawl from: {}", run.start_url);
    println!("Saving Markdown files to: '{}/'", run.output_dir.display());
    println!("Filtering crawl to URL pattern: {}", request.pattern);
    println!("Max crawl depth: {}", run.max_depth);
    println!("{}", "-".repeat(50));

    ensure_output_dir(&run.output_dir)?;
    let crawler = HttpCrawler::new(HttpCrawlerOptions::from_config(cfg))?;
    println!("Crawler initialized. Starting filtered crawl...");

    tokio::task::spawn_blocking(move || crawl_and_save(&crawler, &request, &run))
        .await
        .context("crawl task panicked")
}

/// Runs the crawl and writes every record. A crawler-level failure is
/// reported and ends the run without writing anything.
pub fn crawl_and_save(
    crawler: &dyn Crawler,
    request: &CrawlRequest,
    run: &RunConfig,
) -> CrawlReport {
    let records = match crawler.crawl(request) {
        Ok(records) => records,
        Err(e) => {
            println!("\n[ERROR] A critical error occurred during crawling: {}", e);
            println!("No results obtained.");
            tracing::error!(start_url = %run.start_url, "crawl failed: {}", e);
            return CrawlReport::NoResults;
        }
    };

    println!("\n--- Crawl Finished ---");
    println!(
        "Attempted to process {} pages matching the filter and depth limits.",
        records.len()
    );
    println!("Processing results and saving Markdown files...");

    let summary = process_records(&records, run);

    println!("{}", "-".repeat(50));
    println!(
        "Successfully saved {} Markdown files matching '{}' path to '{}'.",
        summary.saved,
        request.pattern,
        run.output_dir.display()
    );
    if summary.failed() > 0 {
        println!(
            "{} page(s) failed ({} crawl, {} path, {} write).",
            summary.failed(),
            summary.crawl_failed,
            summary.mapping_failed,
            summary.write_failed
        );
    }
    CrawlReport::Finished(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitemd_core::crawl::{CrawlError, CrawlRecord};

    fn args() -> CrawlArgs {
        CrawlArgs {
            url: "https://example.com/docs".into(),
            output_dir: PathBuf::from("out"),
            depth: None,
            quiet: false,
            prefix_policy: None,
            layout: None,
        }
    }

    #[test]
    fn flags_override_config() {
        let mut a = args();
        a.depth = Some(0);
        a.quiet = true;
        a.layout = Some(Layout::Nested);
        let run = run_config(&SitemdConfig::default(), a);
        assert_eq!(run.max_depth, 0);
        assert!(!run.verbose);
        assert_eq!(run.map.layout, Layout::Nested);
        assert_eq!(run.map.prefix_policy, PrefixPolicy::StripStart);
    }

    #[test]
    fn config_used_without_flags() {
        let mut cfg = SitemdConfig::default();
        cfg.max_depth = 5;
        cfg.prefix_policy = PrefixPolicy::FullPath;
        let run = run_config(&cfg, args());
        assert_eq!(run.max_depth, 5);
        assert!(run.verbose);
        assert_eq!(run.map.prefix_policy, PrefixPolicy::FullPath);
    }

    /// Returns the given records, or fails as a whole when there are none.
    struct FakeCrawler(Option<Vec<CrawlRecord>>);

    impl Crawler for FakeCrawler {
        fn crawl(&self, _request: &CrawlRequest) -> Result<Vec<CrawlRecord>, CrawlError> {
            self.0
                .clone()
                .ok_or_else(|| CrawlError::Unavailable("no http".into()))
        }
    }

    fn run_into(out: &std::path::Path) -> (CrawlRequest, RunConfig) {
        let mut a = args();
        a.output_dir = out.to_path_buf();
        let run = run_config(&SitemdConfig::default(), a);
        let request = CrawlRequest::new(&run.start_url, run.max_depth, false).unwrap();
        (request, run)
    }

    #[test]
    fn crawler_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (request, run) = run_into(dir.path());
        let crawler = FakeCrawler(None);

        let report = crawl_and_save(&crawler, &request, &run);

        assert_eq!(report, CrawlReport::NoResults);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn crawled_records_are_saved() {
        let dir = tempfile::tempdir().unwrap();
        let (request, run) = run_into(dir.path());
        let crawler = FakeCrawler(Some(vec![
            CrawlRecord::saved("https://example.com/docs", 200, "# Docs".into()),
            CrawlRecord::saved("https://example.com/docs/guide/intro", 200, "# Intro".into()),
            CrawlRecord::failed("https://example.com/docs/gone", Some(404), "HTTP 404"),
        ]));

        let report = crawl_and_save(&crawler, &request, &run);

        match report {
            CrawlReport::Finished(summary) => {
                assert_eq!(summary.saved, 2);
                assert_eq!(summary.crawl_failed, 1);
            }
            other => panic!("expected Finished, got {:?}", other),
        }
        assert!(dir.path().join("index.md").exists());
        assert!(dir.path().join("guide").join("intro.md").exists());
    }

    #[tokio::test]
    async fn unusable_output_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let taken = dir.path().join("taken");
        std::fs::write(&taken, "x").unwrap();
        let mut a = args();
        a.output_dir = taken;

        let err = run_crawl(&SitemdConfig::default(), a).await.unwrap_err();

        assert!(format!("{:#}", err).contains("output directory"));
    }

    #[tokio::test]
    async fn invalid_start_url_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args();
        a.url = "docs/intro".into();
        a.output_dir = dir.path().join("out");

        let err = run_crawl(&SitemdConfig::default(), a).await.unwrap_err();

        assert!(format!("{:#}", err).contains("invalid start URL"));
        assert!(!dir.path().join("out").exists());
    }
}
