//! Interactive single-page save.

use std::io;
use std::path::PathBuf;

use super::or_none;
use crate::crawl::{CrawlRequest, Crawler};
use crate::prompt::Prompter;
use crate::storage::{resolve_conflict, write_markdown};
use crate::url_model::{default_filename, fallback_filename, with_md_extension};

/// How a single-page session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinglePageOutcome {
    /// The operator gave no URL.
    NoUrl,
    /// The operator aborted at the conflict prompt.
    Aborted,
    Saved(PathBuf),
    /// The crawler errored, reported the page as failed, or returned nothing.
    CrawlFailed,
    /// The page was fetched but produced no Markdown.
    NothingSaved,
    WriteFailed(PathBuf),
}

/// Asks for a URL and a filename, resolves any conflict with an existing
/// file, crawls the page alone (depth 0) and writes its Markdown.
///
/// Only prompt I/O errors are returned; every other failure is reported to
/// the operator and reflected in the outcome.
pub fn run_single_page<C, P>(
    crawler: &C,
    prompter: &mut P,
    verbose: bool,
) -> io::Result<SinglePageOutcome>
where
    C: Crawler + ?Sized,
    P: Prompter + ?Sized,
{
    let url = prompter.ask("Enter the URL you want to crawl: ")?.trim().to_string();
    if url.is_empty() {
        prompter.say("URL cannot be empty.");
        return Ok(SinglePageOutcome::NoUrl);
    }

    let suggested = default_filename(&url).unwrap_or_else(|e| {
        prompter.say(&format!(
            "[WARN] Error generating filename from URL '{}': {}",
            url, e.kind
        ));
        fallback_filename()
    });

    let answer = prompter
        .ask(&format!("Enter the output filename (default: {}): ", suggested))?
        .trim()
        .to_string();
    let filename = if answer.is_empty() {
        prompter.say(&format!("Using default: {}", suggested));
        suggested
    } else {
        with_md_extension(&answer)
    };

    let Some(target) = resolve_conflict(&PathBuf::from(filename), prompter)? else {
        return Ok(SinglePageOutcome::Aborted);
    };

    let records = match CrawlRequest::new(&url, 0, verbose).and_then(|req| crawler.crawl(&req)) {
        Ok(records) => records,
        Err(e) => {
            prompter.say(&format!("[ERROR] An error occurred during crawling: {}", e));
            tracing::error!(%url, "single-page crawl failed: {}", e);
            return Ok(SinglePageOutcome::CrawlFailed);
        }
    };

    let Some(record) = records.first() else {
        prompter.say("[ERROR] No results returned from crawler.");
        return Ok(SinglePageOutcome::CrawlFailed);
    };
    if !record.success {
        prompter.say(&format!(
            "[ERROR] Failed to scrape page. Status: {}, Error: {}",
            or_none(record.status_code),
            or_none(record.error.as_deref())
        ));
        return Ok(SinglePageOutcome::CrawlFailed);
    }
    let Some(content) = record.content() else {
        prompter.say("No Markdown content was scraped, nothing to save.");
        return Ok(SinglePageOutcome::NothingSaved);
    };
    prompter.say(&format!("Successfully scraped content from {}", url));

    match write_markdown(&target, content) {
        Ok(()) => {
            prompter.say(&format!("Successfully saved Markdown to '{}'", target.display()));
            tracing::info!(%url, path = %target.display(), "saved single page");
            Ok(SinglePageOutcome::Saved(target))
        }
        Err(e) => {
            prompter.say(&format!(
                "[ERROR] Could not write to file '{}': {}",
                target.display(),
                e.source
            ));
            tracing::error!(%url, path = %target.display(), "write failed: {}", e.source);
            Ok(SinglePageOutcome::WriteFailed(target))
        }
    }
}
