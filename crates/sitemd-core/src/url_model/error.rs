//! Mapping failure type.

use thiserror::Error;

/// A crawled URL that could not be converted to a local path.
///
/// Non-fatal: callers log it and skip the URL.
#[derive(Debug, Error)]
#[error("could not convert URL '{url}' to filepath: {kind}")]
pub struct MappingError {
    /// The offending URL, verbatim.
    pub url: String,
    pub kind: MappingErrorKind,
}

#[derive(Debug, Error)]
pub enum MappingErrorKind {
    #[error("{0}")]
    Parse(url::ParseError),
    #[error("URL has no hierarchical path")]
    NotHierarchical,
}

impl MappingError {
    pub(crate) fn new(url: &str, kind: MappingErrorKind) -> Self {
        Self {
            url: url.to_string(),
            kind,
        }
    }
}
