//! Same-origin URL filter.

use std::fmt;
use url::Url;

/// Wildcard URL pattern; `*` matches any run of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPattern {
    pattern: String,
}

impl UrlPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// `<scheme>://<host><path-prefix>/*` for the start URL. The path prefix
    /// is the start path without its trailing `/`; a root path gives
    /// `<scheme>://<host>/*`.
    pub fn from_start_url(start_url: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(start_url)?;
        let host = parsed.host_str().unwrap_or_default();
        let authority = match parsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let path_base = parsed.path().trim_end_matches('/');
        Ok(Self::new(format!(
            "{}://{}{}/*",
            parsed.scheme(),
            authority,
            path_base
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, candidate: &str) -> bool {
        wildcard_match(&self.pattern, candidate)
    }
}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Not glob: `*` also spans `/`, and `[`, `?` are literal (IPv6 hosts).
fn wildcard_match(pattern: &str, text: &str) -> bool {
    let mut parts = pattern.split('*');
    let head = parts.next().unwrap_or_default();
    let Some(mut rest) = text.strip_prefix(head) else {
        return false;
    };
    let tail: Vec<&str> = parts.collect();
    let Some((last, middle)) = tail.split_last() else {
        // No wildcard at all: exact match.
        return rest.is_empty();
    };
    for part in middle {
        match rest.find(part) {
            Some(i) => rest = &rest[i + part.len()..],
            None => return false,
        }
    }
    rest.ends_with(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_from_path_start() {
        let p = UrlPattern::from_start_url("https://code.visualstudio.com/api").unwrap();
        assert_eq!(p.as_str(), "https://code.visualstudio.com/api/*");
        let p = UrlPattern::from_start_url("https://example.com/docs/").unwrap();
        assert_eq!(p.as_str(), "https://example.com/docs/*");
    }

    #[test]
    fn pattern_from_root_start() {
        let p = UrlPattern::from_start_url("https://example.com").unwrap();
        assert_eq!(p.as_str(), "https://example.com/*");
        let p = UrlPattern::from_start_url("http://127.0.0.1:8080/").unwrap();
        assert_eq!(p.as_str(), "http://127.0.0.1:8080/*");
    }

    #[test]
    fn matches_urls_under_prefix() {
        let p = UrlPattern::from_start_url("https://example.com/docs").unwrap();
        assert!(p.matches("https://example.com/docs/guide/intro"));
        assert!(p.matches("https://example.com/docs/setup/?x=1"));
        assert!(!p.matches("https://example.com/docs"));
        assert!(!p.matches("https://example.com/blog/post"));
        assert!(!p.matches("https://other.com/docs/guide"));
        assert!(!p.matches("http://example.com/docs/guide"));
    }

    #[test]
    fn wildcard_in_the_middle() {
        let p = UrlPattern::new("https://*.example.com/*/index");
        assert!(p.matches("https://docs.example.com/en/index"));
        assert!(!p.matches("https://docs.example.com/en/about"));
        assert!(UrlPattern::new("exact").matches("exact"));
        assert!(!UrlPattern::new("exact").matches("exactly"));
    }

    #[test]
    fn star_spans_slashes_and_brackets_are_literal() {
        let p = UrlPattern::from_start_url("http://[::1]:8080/docs").unwrap();
        assert_eq!(p.as_str(), "http://[::1]:8080/docs/*");
        assert!(p.matches("http://[::1]:8080/docs/a/b/c"));
        assert!(!p.matches("http://[::2]:8080/docs/a"));
    }
}
