//! Disk I/O for mapped Markdown files.
//!
//! Creates parent directories, writes through a `.part` temp file with an
//! atomic rename onto the final name, and resolves name conflicts for
//! single-page saves (overwrite, numbered rename, or abort).

mod conflict;
mod writer;

pub use conflict::{next_available_path, resolve_conflict, ConflictChoice};
pub use writer::{decode_lossy, write_markdown, WriteError};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `intro.md` → `intro.md.part`).
pub fn temp_path(final_path: &std::path::Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    std::path::PathBuf::from(o)
}
