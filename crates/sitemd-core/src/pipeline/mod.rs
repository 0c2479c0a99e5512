//! Record processing: crawl results in, Markdown files out.
//!
//! The batch path maps and writes every record in order and keeps going past
//! per-record failures. The single-page path drives one interactive save.

mod batch;
mod single_page;

pub use batch::{process_record, process_records, BatchSummary, FailReason, WriteResult};
pub use single_page::{run_single_page, SinglePageOutcome};

/// Renders an optional diagnostic value the way failure lines show it.
pub(crate) fn or_none<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}
