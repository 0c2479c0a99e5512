//! CLI command handlers, one file per command.

mod crawl;
mod page;

pub use crawl::{run_crawl, CrawlArgs};
pub use page::run_page;
