//! Filesystem-safe sanitization of URL path components and filenames.

/// Maximum characters kept per path component when mapping a multi-page crawl.
pub const SEGMENT_MAX_CHARS: usize = 100;

/// Maximum characters kept for a single-page output filename.
pub const FILENAME_MAX_CHARS: usize = 150;

/// Stem used when a single-page filename sanitizes to nothing.
pub const FALLBACK_STEM: &str = "scraped_page";

/// Characters reserved on at least one of Windows, macOS or Linux.
fn is_reserved(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '\\' | '|' | '?' | '*')
}

/// Sanitizes one decoded URL path component.
///
/// - Replaces `< > : " \ | ? *` and whitespace with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing `.` and `_`
/// - Truncates to `max_chars` characters
///
/// Returns `None` when nothing usable is left, so the caller can drop the
/// component. The result is stable: sanitizing it again yields the same value.
pub fn sanitize_segment(raw: &str, max_chars: usize) -> Option<String> {
    let cleaned = clean(raw, |c| is_reserved(c) || c.is_whitespace(), max_chars);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Sanitizes a filename stem for single-page mode.
///
/// Like [`sanitize_segment`] but also replaces `/`, allows up to
/// [`FILENAME_MAX_CHARS`] characters and never returns an empty string.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned = clean(
        name,
        |c| c == '/' || is_reserved(c) || c.is_whitespace(),
        FILENAME_MAX_CHARS,
    );
    if cleaned.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        cleaned
    }
}

fn clean(raw: &str, replace: impl Fn(char) -> bool, max_chars: usize) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_underscore = false;

    for c in raw.chars() {
        let c = if replace(c) { '_' } else { c };
        if c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = trim_edges(&out);
    // Truncation can expose a trailing '.' or '_', so trim once more.
    match trimmed.char_indices().nth(max_chars) {
        Some((cut, _)) => trim_edges(&trimmed[..cut]).to_string(),
        None => trimmed.to_string(),
    }
}

fn trim_edges(s: &str) -> &str {
    s.trim_matches(|c| c == '.' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(raw: &str) -> Option<String> {
        sanitize_segment(raw, SEGMENT_MAX_CHARS)
    }

    #[test]
    fn replaces_reserved_and_whitespace() {
        assert_eq!(seg("Weird Name?.html").as_deref(), Some("Weird_Name_.html"));
        assert_eq!(seg("a<b>c:d\"e|f*g").as_deref(), Some("a_b_c_d_e_f_g"));
        assert_eq!(seg("back\\slash").as_deref(), Some("back_slash"));
    }

    #[test]
    fn collapses_runs() {
        assert_eq!(seg("a   b").as_deref(), Some("a_b"));
        assert_eq!(seg("a?*?b").as_deref(), Some("a_b"));
        assert_eq!(seg("file___name").as_deref(), Some("file_name"));
        assert_eq!(seg("tab\t\nnewline").as_deref(), Some("tab_newline"));
    }

    #[test]
    fn trims_dots_and_underscores() {
        assert_eq!(seg("..hidden..").as_deref(), Some("hidden"));
        assert_eq!(seg("__init__").as_deref(), Some("init"));
        assert_eq!(seg(" ?leading").as_deref(), Some("leading"));
    }

    #[test]
    fn empty_results_are_dropped() {
        assert_eq!(seg(""), None);
        assert_eq!(seg("."), None);
        assert_eq!(seg(".."), None);
        assert_eq!(seg("???"), None);
        assert_eq!(seg("  "), None);
    }

    #[test]
    fn truncates_by_characters() {
        let long = "é".repeat(150);
        let out = seg(&long).unwrap();
        assert_eq!(out.chars().count(), SEGMENT_MAX_CHARS);
    }

    #[test]
    fn truncation_does_not_leave_trailing_separator() {
        let raw = format!("{}_tail", "a".repeat(SEGMENT_MAX_CHARS - 1));
        let out = seg(&raw).unwrap();
        assert_eq!(out, "a".repeat(SEGMENT_MAX_CHARS - 1));
    }

    #[test]
    fn sanitize_is_idempotent() {
        let samples = [
            "Weird Name?.html",
            "..a..b..",
            "__x__y__",
            "  spaced   out  ",
            "mixed<>:\"\\|?*chars",
            &format!("{}.{}", "z".repeat(99), "ext"),
            "ünïcödé pàth",
        ];
        for raw in samples {
            if let Some(once) = seg(raw) {
                assert_eq!(seg(&once).as_deref(), Some(once.as_str()), "input {raw:?}");
            }
        }
    }

    #[test]
    fn output_has_no_forbidden_characters() {
        let out = seg(" a<b>c:d\"e\\f|g?h*i j ").unwrap();
        assert!(!out.chars().any(|c| "<>:\"\\|?*".contains(c) || c.is_whitespace()));
        assert!(!out.starts_with(['.', '_']));
        assert!(!out.ends_with(['.', '_']));
    }

    #[test]
    fn filename_replaces_slash_and_falls_back() {
        assert_eq!(sanitize_filename("a/b c"), "a_b_c");
        assert_eq!(sanitize_filename("///"), FALLBACK_STEM);
        assert_eq!(sanitize_filename(""), FALLBACK_STEM);
        assert_eq!(sanitize_filename(&"x".repeat(200)).len(), FILENAME_MAX_CHARS);
    }
}
