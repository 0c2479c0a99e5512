//! URL modeling and local path derivation.
//!
//! Turns crawled URLs into safe, hierarchical Markdown file paths under an
//! output root, and suggests filenames for single-page saves. Everything here
//! is pure computation; nothing touches the filesystem.

mod error;
mod map;
mod path;
mod percent;
mod sanitize;

pub use error::{MappingError, MappingErrorKind};
pub use map::{map_url, Layout, MapOptions, PrefixPolicy, INDEX_FILE};
pub use path::default_filename;
pub(crate) use path::with_md_extension;
pub use sanitize::{
    sanitize_filename, sanitize_segment, FALLBACK_STEM, FILENAME_MAX_CHARS, SEGMENT_MAX_CHARS,
};

/// Filename used when a single-page URL cannot be turned into a name.
pub fn fallback_filename() -> String {
    format!("{}.md", FALLBACK_STEM)
}
