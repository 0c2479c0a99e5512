//! Batch mode: map and write each crawl record.

use std::path::PathBuf;

use super::or_none;
use crate::config::RunConfig;
use crate::crawl::CrawlRecord;
use crate::storage::{write_markdown, WriteError};
use crate::url_model::{map_url, MappingError};

/// What happened to one crawl record.
#[derive(Debug)]
pub enum WriteResult {
    Saved(PathBuf),
    /// Fetched fine but had no Markdown to save.
    Skipped,
    Failed(FailReason),
}

#[derive(Debug)]
pub enum FailReason {
    /// The collaborator reported the page as failed.
    Crawl {
        status_code: Option<u32>,
        error: Option<String>,
    },
    Mapping(MappingError),
    Write(WriteError),
}

/// Counters for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub saved: usize,
    pub skipped: usize,
    pub crawl_failed: usize,
    pub mapping_failed: usize,
    pub write_failed: usize,
}

impl BatchSummary {
    fn record(&mut self, result: &WriteResult) {
        match result {
            WriteResult::Saved(_) => self.saved += 1,
            WriteResult::Skipped => self.skipped += 1,
            WriteResult::Failed(FailReason::Crawl { .. }) => self.crawl_failed += 1,
            WriteResult::Failed(FailReason::Mapping(_)) => self.mapping_failed += 1,
            WriteResult::Failed(FailReason::Write(_)) => self.write_failed += 1,
        }
    }

    pub fn failed(&self) -> usize {
        self.crawl_failed + self.mapping_failed + self.write_failed
    }
}

/// Maps and writes one record. Overwrites any existing file at the mapped
/// path. Prints a `[SAVED]`, `[ERROR]` or `[FAILED]` line for the operator.
pub fn process_record(record: &CrawlRecord, run: &RunConfig) -> WriteResult {
    if !record.success {
        println!(
            "  [FAILED] {} (Status: {}, Error: {})",
            record.url,
            or_none(record.status_code),
            or_none(record.error.as_deref())
        );
        tracing::warn!(url = %record.url, status = ?record.status_code, error = ?record.error, "page failed");
        return WriteResult::Failed(FailReason::Crawl {
            status_code: record.status_code,
            error: record.error.clone(),
        });
    }

    let Some(content) = record.content() else {
        tracing::debug!(url = %record.url, "no markdown content, skipping");
        return WriteResult::Skipped;
    };

    let path = match map_url(&record.url, &run.start_url, &run.output_dir, run.map) {
        Ok(path) => path,
        Err(e) => {
            println!("  [ERROR] Could not convert URL '{}' to filepath: {}", e.url, e.kind);
            tracing::warn!(url = %record.url, "{}", e);
            return WriteResult::Failed(FailReason::Mapping(e));
        }
    };

    match write_markdown(&path, content) {
        Ok(()) => {
            println!("  [SAVED] {} -> {}", record.url, path.display());
            tracing::info!(url = %record.url, path = %path.display(), "saved page");
            WriteResult::Saved(path)
        }
        Err(e) => {
            println!("  [ERROR] Could not save file {}: {}", e.path.display(), e.source);
            tracing::error!(url = %record.url, path = %e.path.display(), "write failed: {}", e.source);
            WriteResult::Failed(FailReason::Write(e))
        }
    }
}

/// Processes records strictly in order; failures never stop the batch.
pub fn process_records(records: &[CrawlRecord], run: &RunConfig) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for record in records {
        let result = process_record(record, run);
        summary.record(&result);
    }
    tracing::info!(
        saved = summary.saved,
        skipped = summary.skipped,
        failed = summary.failed(),
        "batch finished"
    );
    summary
}
