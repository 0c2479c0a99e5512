//! Crawl collaborator contract and the HTTP implementation.
//!
//! The pipeline only sees [`Crawler`]: one request in, an ordered list of
//! [`CrawlRecord`]s out. [`HttpCrawler`] fulfils it with a breadth-first
//! traversal over libcurl, restricted by a [`UrlPattern`] derived from the
//! start URL.

mod fetch;
mod html;
mod http;
mod pattern;

pub use http::{HttpCrawler, HttpCrawlerOptions};
pub use pattern::UrlPattern;

use thiserror::Error;

/// One crawl run: where to start, how deep to follow links, what to follow.
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    pub start_url: String,
    /// Link hops followed from the start URL; 0 fetches only the start page.
    pub max_depth: usize,
    pub pattern: UrlPattern,
    /// Per-page progress output.
    pub verbose: bool,
}

impl CrawlRequest {
    /// Builds a request whose pattern is derived from `start_url`.
    pub fn new(start_url: &str, max_depth: usize, verbose: bool) -> Result<Self, CrawlError> {
        let pattern = UrlPattern::from_start_url(start_url).map_err(|cause| {
            CrawlError::InvalidStartUrl {
                url: start_url.to_string(),
                cause,
            }
        })?;
        Ok(Self {
            start_url: start_url.to_string(),
            max_depth,
            pattern,
            verbose,
        })
    }
}

/// Outcome of visiting one URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlRecord {
    pub url: String,
    pub success: bool,
    /// Converted page body; `None` or empty means nothing to save.
    pub markdown: Option<String>,
    pub status_code: Option<u32>,
    pub error: Option<String>,
}

impl CrawlRecord {
    pub fn saved(url: impl Into<String>, status_code: u32, markdown: String) -> Self {
        Self {
            url: url.into(),
            success: true,
            markdown: Some(markdown),
            status_code: Some(status_code),
            error: None,
        }
    }

    pub fn failed(url: impl Into<String>, status_code: Option<u32>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            success: false,
            markdown: None,
            status_code,
            error: Some(error.into()),
        }
    }

    /// Markdown body when the record has something worth saving.
    pub fn content(&self) -> Option<&str> {
        self.markdown.as_deref().filter(|m| !m.is_empty())
    }
}

/// Collaborator-level failure: the crawl could not run at all.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid start URL '{url}': {cause}")]
    InvalidStartUrl { url: String, cause: url::ParseError },
    #[error("HTTP backend unavailable: {0}")]
    Unavailable(String),
}

/// Source of crawl results.
pub trait Crawler {
    /// Crawls from `request.start_url` and returns one record per visited
    /// URL, in visiting order.
    fn crawl(&self, request: &CrawlRequest) -> Result<Vec<CrawlRecord>, CrawlError>;
}
