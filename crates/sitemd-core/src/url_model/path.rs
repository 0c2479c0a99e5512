//! Path component extraction from URLs.

use url::Url;

use super::error::{MappingError, MappingErrorKind};
use super::percent::percent_decode;
use super::sanitize::{sanitize_filename, sanitize_segment, FALLBACK_STEM};

/// Sanitized path components of a URL plus whether the raw path ended in `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DecodedPath {
    pub components: Vec<String>,
    pub trailing_slash: bool,
}

/// Parses `raw` as an absolute hierarchical URL.
pub(crate) fn parse_url(raw: &str) -> Result<Url, MappingError> {
    let parsed = Url::parse(raw).map_err(|e| MappingError::new(raw, MappingErrorKind::Parse(e)))?;
    if parsed.cannot_be_a_base() {
        return Err(MappingError::new(raw, MappingErrorKind::NotHierarchical));
    }
    Ok(parsed)
}

/// Path text of `raw` exactly as written: after the authority, before the
/// first `?` or `#`. No dot-segment resolution or separator rewriting.
fn raw_path(raw: &str) -> &str {
    let raw = raw.trim();
    let after_scheme = match raw.find(':') {
        Some(colon) => &raw[colon + 1..],
        None => raw,
    };
    let path_and_rest = match after_scheme.strip_prefix("//") {
        Some(rest) => match rest.find(['/', '?', '#']) {
            Some(end) => &rest[end..],
            None => "",
        },
        None => after_scheme,
    };
    match path_and_rest.find(['?', '#']) {
        Some(end) => &path_and_rest[..end],
        None => path_and_rest,
    }
}

/// Decodes and sanitizes the path of the URL string `raw`. Query and
/// fragment are ignored, and anything after a `#` that only appears once
/// decoded is cut off. Validate `raw` with [`parse_url`] first.
pub(crate) fn decode_path(raw: &str, max_chars: usize) -> DecodedPath {
    let path = raw_path(raw);
    let stripped = path.strip_prefix('/').unwrap_or(path);
    let decoded = percent_decode(stripped);
    let decoded = decoded.split('#').next().unwrap_or_default();

    let components = decoded
        .split('/')
        .filter_map(|c| sanitize_segment(c, max_chars))
        .collect();

    DecodedPath {
        components,
        trailing_slash: path.is_empty() || path.ends_with('/'),
    }
}

/// Suggests an output filename for saving the single page at `url`.
///
/// Uses the last non-empty path segment with its extension removed, or the
/// host (dots replaced by `_`) for root URLs. Always ends in `.md`.
///
/// - `https://example.com/guide/intro.html` → `intro.md`
/// - `https://docs.example.com/` → `docs_example_com.md`
pub fn default_filename(url: &str) -> Result<String, MappingError> {
    let parsed = Url::parse(url).map_err(|e| MappingError::new(url, MappingErrorKind::Parse(e)))?;
    let path = percent_decode(raw_path(url).trim_matches('/'));

    let name = match path.rsplit('/').find(|s| !s.is_empty()) {
        Some(segment) => segment.to_string(),
        None => host_name(&parsed),
    };

    let stem = sanitize_filename(strip_extension(&name));
    Ok(with_md_extension(&stem))
}

fn host_name(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port).replace('.', "_"),
        (Some(host), None) => host.replace('.', "_"),
        (None, _) => FALLBACK_STEM.to_string(),
    }
}

/// Removes the final extension, ignoring leading dots of the base name
/// (`archive.tar.gz` → `archive.tar`, `.profile` stays as is).
fn strip_extension(name: &str) -> &str {
    let base_start = name.rfind('/').map_or(0, |i| i + 1);
    let base = &name[base_start..];
    let leading_dots = base.len() - base.trim_start_matches('.').len();
    match base[leading_dots..].rfind('.') {
        Some(dot) => &name[..base_start + leading_dots + dot],
        None => name,
    }
}

/// Appends `.md` unless the name already ends with it (case-insensitive).
pub(crate) fn with_md_extension(name: &str) -> String {
    if name.to_ascii_lowercase().ends_with(".md") {
        name.to_string()
    } else {
        format!("{}.md", name)
    }
}
