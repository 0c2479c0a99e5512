//! Name conflict resolution for single-page saves.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use crate::prompt::Prompter;

/// Operator's answer when the target file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    /// Write over the existing file.
    Overwrite,
    /// Write to the next free `<stem>_<n>.<ext>` name instead.
    Rename,
    /// Stop without writing.
    Abort,
}

impl ConflictChoice {
    /// Parses `o`, `r` or `a` (case-insensitive, surrounding whitespace ignored).
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim().to_ascii_lowercase().as_str() {
            "o" => Some(Self::Overwrite),
            "r" => Some(Self::Rename),
            "a" => Some(Self::Abort),
            _ => None,
        }
    }
}

/// Returns the first of `stem_1.ext`, `stem_2.ext`, ... (next to `path`) that
/// does not exist yet.
pub fn next_available_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    let ext = path.extension();

    let mut counter: u32 = 1;
    loop {
        let mut name = OsString::from(&stem);
        name.push(format!("_{}", counter));
        if let Some(ext) = ext {
            name.push(".");
            name.push(ext);
        }
        let candidate = path.with_file_name(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Decides where a single-page save goes.
///
/// Returns `path` unchanged when it does not exist. Otherwise asks the
/// operator until a valid choice is given: overwrite keeps `path`, rename
/// returns [`next_available_path`], abort returns `None`.
pub fn resolve_conflict<P>(path: &Path, prompter: &mut P) -> io::Result<Option<PathBuf>>
where
    P: Prompter + ?Sized,
{
    if !path.exists() {
        return Ok(Some(path.to_path_buf()));
    }

    loop {
        let answer = prompter.ask(&format!(
            "File '{}' already exists. Overwrite (o), Rename (r), Abort (a)? ",
            path.display()
        ))?;
        match ConflictChoice::parse(&answer) {
            Some(ConflictChoice::Overwrite) => {
                prompter.say(&format!("Will overwrite '{}'.", path.display()));
                return Ok(Some(path.to_path_buf()));
            }
            Some(ConflictChoice::Rename) => {
                let renamed = next_available_path(path);
                prompter.say(&format!("Will save as '{}' instead.", renamed.display()));
                return Ok(Some(renamed));
            }
            Some(ConflictChoice::Abort) => {
                prompter.say("Operation aborted.");
                return Ok(None);
            }
            None => prompter.say("Invalid choice. Please enter 'o', 'r', or 'a'."),
        }
    }
}
