//! Single page GET over libcurl.

use std::time::Duration;

use crate::retry::FetchError;

/// Request settings shared by every fetch in a crawl.
#[derive(Debug, Clone)]
pub(crate) struct FetchOptions {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

/// A 2xx response body and the metadata needed to process it.
#[derive(Debug, Clone)]
pub(crate) struct FetchedPage {
    /// URL after redirects; links are resolved against it.
    pub effective_url: String,
    pub status: u32,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Performs a GET request, following redirects.
///
/// Non-2xx responses are returned as `FetchError::Http` so they can be
/// classified for retry. Blocks the current thread.
pub(crate) fn fetch_page(url: &str, opts: &FetchOptions) -> Result<FetchedPage, FetchError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(&opts.user_agent)?;
    easy.accept_encoding("")?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        return Err(FetchError::Http(status));
    }

    let content_type = easy.content_type()?.map(str::to_string);
    let effective_url = easy.effective_url()?.unwrap_or(url).to_string();

    Ok(FetchedPage {
        effective_url,
        status,
        content_type,
        body,
    })
}

/// Body kinds the crawler knows how to turn into Markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyKind {
    Html,
    /// Plain text or Markdown, saved verbatim.
    Text,
    Unsupported,
}

/// Classifies a `Content-Type` header. A missing header is treated as HTML.
pub(crate) fn body_kind(content_type: Option<&str>) -> BodyKind {
    let Some(ct) = content_type else {
        return BodyKind::Html;
    };
    let mime = ct
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match mime.as_str() {
        "text/html" | "application/xhtml+xml" => BodyKind::Html,
        "text/plain" | "text/markdown" | "text/x-markdown" => BodyKind::Text,
        _ => BodyKind::Unsupported,
    }
}
