//! Breadth-first HTTP crawler.

use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use url::Url;

use super::fetch::{body_kind, fetch_page, BodyKind, FetchOptions};
use super::html::{extract_links, html_to_markdown, normalize_url};
use super::{CrawlError, CrawlRecord, CrawlRequest, Crawler};
use crate::config::SitemdConfig;
use crate::retry::{run_with_retry, RetryPolicy};
use crate::storage::decode_lossy;

/// Crawler settings taken from the config file.
#[derive(Debug, Clone)]
pub struct HttpCrawlerOptions {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    /// Stop after this many fetched pages.
    pub max_pages: usize,
    pub retry: RetryPolicy,
}

impl HttpCrawlerOptions {
    pub fn from_config(cfg: &SitemdConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            max_pages: cfg.max_pages.max(1),
            retry: cfg
                .retry
                .as_ref()
                .map(RetryPolicy::from_config)
                .unwrap_or_default(),
        }
    }
}

impl Default for HttpCrawlerOptions {
    fn default() -> Self {
        Self::from_config(&SitemdConfig::default())
    }
}

/// Fetches pages with libcurl, follows `a[href]` links matching the request
/// pattern, and converts HTML to Markdown.
#[derive(Debug, Clone)]
pub struct HttpCrawler {
    fetch: FetchOptions,
    max_pages: usize,
    retry: RetryPolicy,
}

impl HttpCrawler {
    /// Fails when the linked libcurl cannot speak HTTP.
    pub fn new(options: HttpCrawlerOptions) -> Result<Self, CrawlError> {
        let version = curl::Version::get();
        let has_http = version.protocols().any(|p| p.eq_ignore_ascii_case("http"));
        if !has_http {
            return Err(CrawlError::Unavailable(format!(
                "libcurl {} was built without HTTP support",
                version.version()
            )));
        }
        if !version.protocols().any(|p| p.eq_ignore_ascii_case("https")) {
            tracing::warn!("libcurl {} has no HTTPS support", version.version());
        }

        Ok(Self {
            fetch: FetchOptions {
                user_agent: options.user_agent,
                connect_timeout: options.connect_timeout,
                timeout: options.timeout,
            },
            max_pages: options.max_pages,
            retry: options.retry,
        })
    }

    /// Fetches one page and returns its record plus the links found on it.
    fn visit(&self, url: &str, verbose: bool) -> (CrawlRecord, Vec<String>) {
        let started = Instant::now();
        let page = match run_with_retry(&self.retry, || fetch_page(url, &self.fetch)) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(url, status = ?e.status_code(), "fetch failed: {}", e);
                return (CrawlRecord::failed(url, e.status_code(), e.to_string()), Vec::new());
            }
        };

        if verbose {
            println!(
                "[FETCH] {} | {} | {}ms",
                url,
                page.status,
                started.elapsed().as_millis()
            );
        }
        tracing::debug!(url, status = page.status, bytes = page.body.len(), "fetched page");

        let text = decode_lossy(&page.body);
        match body_kind(page.content_type.as_deref()) {
            BodyKind::Text => (CrawlRecord::saved(url, page.status, text.into_owned()), Vec::new()),
            BodyKind::Unsupported => {
                let ct = page.content_type.unwrap_or_default();
                (
                    CrawlRecord::failed(url, Some(page.status), format!("unsupported content type: {}", ct)),
                    Vec::new(),
                )
            }
            BodyKind::Html => {
                let links = match Url::parse(&page.effective_url) {
                    Ok(base) => extract_links(&text, &base),
                    Err(_) => Vec::new(),
                };
                match html_to_markdown(&text) {
                    Ok(markdown) => (CrawlRecord::saved(url, page.status, markdown), links),
                    Err(e) => (
                        CrawlRecord::failed(url, Some(page.status), format!("markdown conversion failed: {}", e)),
                        links,
                    ),
                }
            }
        }
    }
}

impl Crawler for HttpCrawler {
    fn crawl(&self, request: &CrawlRequest) -> Result<Vec<CrawlRecord>, CrawlError> {
        let start = Url::parse(&request.start_url).map_err(|cause| CrawlError::InvalidStartUrl {
            url: request.start_url.clone(),
            cause,
        })?;
        let start = normalize_url(&start);

        let mut queue = VecDeque::from([(start.clone(), 0usize)]);
        let mut seen = HashSet::from([start]);
        let mut records = Vec::new();

        while let Some((url, depth)) = queue.pop_front() {
            if records.len() >= self.max_pages {
                tracing::warn!(
                    max_pages = self.max_pages,
                    pending = queue.len() + 1,
                    "page limit reached, stopping crawl"
                );
                break;
            }

            let (record, links) = self.visit(&url, request.verbose);
            if depth < request.max_depth {
                for link in links {
                    if request.pattern.matches(&link) && seen.insert(link.clone()) {
                        queue.push_back((link, depth + 1));
                    }
                }
            }
            records.push(record);
        }

        tracing::info!(
            start_url = %request.start_url,
            pages = records.len(),
            max_depth = request.max_depth,
            "crawl finished"
        );
        Ok(records)
    }
}
