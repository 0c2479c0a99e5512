//! Markdown file writer.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::temp_path;

/// Filesystem failure while saving one file.
#[derive(Debug, Error)]
#[error("could not save file {}", .path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Decodes page bytes as UTF-8, replacing invalid sequences with U+FFFD.
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Writes `content` to `path`, creating missing parent directories.
///
/// Overwrites any existing file. The content goes to `<path>.part` first and
/// is renamed into place, so a failed write leaves the previous file intact.
pub fn write_markdown(path: &Path, content: &str) -> Result<(), WriteError> {
    let wrap = |source: io::Error| WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }

    let tmp = temp_path(path);
    let result = write_then_rename(&tmp, path, content);
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result.map_err(wrap)?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote markdown file");
    Ok(())
}

fn write_then_rename(tmp: &Path, path: &Path, content: &str) -> io::Result<()> {
    let mut file = File::create(tmp)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp, path)
}
