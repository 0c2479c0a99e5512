//! Crawled URL → local Markdown file path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::MappingError;
use super::path::{decode_path, parse_url, with_md_extension};
use super::sanitize::SEGMENT_MAX_CHARS;

/// Filename used for the start page and for directory-like URLs.
pub const INDEX_FILE: &str = "index.md";

/// How the start URL's path prefix is treated when mapping crawled URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrefixPolicy {
    /// Drop the components shared with the start path; the start page and its
    /// parents become `index.md` at the output root.
    #[default]
    StripStart,
    /// Keep every path component; only the start page itself becomes an
    /// `index.md`, inside the directory named after its own path.
    FullPath,
}

/// Directory layout for pages with two or more remaining components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// First component is the directory, last is the file; interior
    /// components are discarded. Distinct URLs sharing first and last
    /// components map to the same file.
    #[default]
    Flat,
    /// Every component but the last becomes a nested directory.
    Nested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapOptions {
    pub prefix_policy: PrefixPolicy,
    pub layout: Layout,
}

/// Maps a crawled `url` to a Markdown file path under `output_root`.
///
/// Pure and deterministic: the same decoded path always yields the same
/// output. Collisions between distinct URLs are not detected.
///
/// With the default options and start `https://example.com/docs`:
///
/// - `https://example.com/docs` → `<root>/index.md`
/// - `https://example.com/docs/guide/intro` → `<root>/guide/intro.md`
/// - `https://example.com/docs/setup/` → `<root>/setup/index.md`
pub fn map_url(
    url: &str,
    start_url: &str,
    output_root: &Path,
    options: MapOptions,
) -> Result<PathBuf, MappingError> {
    parse_url(url)?;
    parse_url(start_url)?;
    let page = decode_path(url, SEGMENT_MAX_CHARS);
    let start_components = decode_path(start_url, SEGMENT_MAX_CHARS).components;

    let remaining: &[String] = match options.prefix_policy {
        PrefixPolicy::StripStart => {
            if url == start_url || is_within(&page.components, &start_components) {
                return Ok(output_root.join(INDEX_FILE));
            }
            let shared = common_prefix_len(&page.components, &start_components);
            &page.components[shared..]
        }
        PrefixPolicy::FullPath => {
            if url == start_url || page.components == start_components {
                return Ok(join_dirs(output_root, &start_components).join(INDEX_FILE));
            }
            &page.components
        }
    };

    Ok(split_dir_and_file(
        output_root,
        remaining,
        page.trailing_slash,
        options.layout,
    ))
}

/// True when `components` is the start path itself or one of its parents.
fn is_within(components: &[String], start: &[String]) -> bool {
    components.len() <= start.len() && components.iter().zip(start).all(|(a, b)| a == b)
}

fn common_prefix_len(a: &[String], b: &[String]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn join_dirs(root: &Path, dirs: &[String]) -> PathBuf {
    dirs.iter().fold(root.to_path_buf(), |acc, d| acc.join(d))
}

fn split_dir_and_file(
    root: &Path,
    remaining: &[String],
    trailing_slash: bool,
    layout: Layout,
) -> PathBuf {
    if trailing_slash {
        return join_dirs(root, remaining).join(INDEX_FILE);
    }
    match remaining {
        [] => root.join(INDEX_FILE),
        [only] => root.join(with_md_extension(only)),
        [first, .., last] => match layout {
            Layout::Flat => root.join(first).join(with_md_extension(last)),
            Layout::Nested => {
                join_dirs(root, &remaining[..remaining.len() - 1]).join(with_md_extension(last))
            }
        },
    }
}
