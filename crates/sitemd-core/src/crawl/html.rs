//! Link extraction and HTML-to-Markdown conversion.

use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

/// Absolute http(s) links from `a[href]`, resolved against `base`, with
/// fragments removed and duplicates dropped (first occurrence wins).
pub(crate) fn extract_links(html: &str, base: &Url) -> Vec<String> {
    let doc = Html::parse_document(html);
    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for el in doc.select(&selector) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        let Some(resolved) = resolve_href(base, href) else {
            continue;
        };
        if seen.insert(resolved.clone()) {
            out.push(resolved);
        }
    }
    out
}

fn resolve_href(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);
    Some(url.to_string())
}

/// Strips the fragment so `page#a` and `page#b` are one visit.
pub(crate) fn normalize_url(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.to_string()
}

/// Converts an HTML document to Markdown, skipping non-content tags.
pub(crate) fn html_to_markdown(html: &str) -> Result<String, std::io::Error> {
    let converter = htmd::HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style", "noscript", "head"])
        .build();
    converter.convert(html)
}
