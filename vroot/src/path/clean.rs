//! Lexical path cleaning and joining.
//!
//! These functions work on the string form of virtual paths. They never touch
//! the filesystem and never fail: malformed input degrades to `.`.

/// The separator used by every path this crate produces.
pub const SEPARATOR: char = '/';

/// Marker that identifies a remote URI (`scheme://...`).
const REMOTE_MARKER: &str = "://";

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Check whether a path is a remote URI.
///
/// Remote paths pass through every transformation unchanged.
///
/// # Examples
///
/// ```
/// use vroot::path::is_remote;
///
/// assert!(is_remote("https://cdn.example.com/a.png"));
/// assert!(!is_remote("/var/www/a.png"));
/// ```
#[must_use]
pub fn is_remote(path: &str) -> bool {
    path.contains(REMOTE_MARKER)
}

/// Lexically clean a path.
///
/// - `.` segments and empty segments are dropped
/// - `..` pops the preceding segment, and is dropped when nothing precedes it
/// - `\` is accepted as a separator on input; output always uses `/`
/// - an empty result is `/` for absolute input and `.` otherwise
///
/// Remote paths are returned unmodified. The function is idempotent.
///
/// # Examples
///
/// ```
/// use vroot::path::clean_path;
///
/// assert_eq!(clean_path("/a/./b/../c/"), "/a/c");
/// assert_eq!(clean_path("a//b"), "a/b");
/// assert_eq!(clean_path("/.."), "/");
/// assert_eq!(clean_path(""), ".");
/// ```
#[must_use]
pub fn clean_path(path: &str) -> String {
    if is_remote(path) {
        return path.to_string();
    }

    let absolute = path.starts_with(is_separator);
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split(is_separator) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, true) => SEPARATOR.to_string(),
        (false, true) => ".".to_string(),
        (true, false) => format!("{SEPARATOR}{joined}"),
        (false, false) => joined,
    }
}

/// Join path parts with the canonical separator.
///
/// Trailing separators are trimmed from each part before joining and empty
/// parts are skipped. No other normalization happens; pass the result through
/// [`clean_path`] when a canonical form is needed.
///
/// # Examples
///
/// ```
/// use vroot::path::make_path;
///
/// assert_eq!(make_path(&["/srv/site/", "assets"]), "/srv/site/assets");
/// assert_eq!(make_path(&["/", "a", "b"]), "/a/b");
/// assert_eq!(make_path(&["", "x"]), "x");
/// ```
#[must_use]
pub fn make_path<S: AsRef<str>>(parts: &[S]) -> String {
    let mut out = String::new();
    let mut first = true;

    for part in parts.iter().map(AsRef::as_ref).filter(|p| !p.is_empty()) {
        let trimmed = part.trim_end_matches(is_separator);
        if !first {
            out.push(SEPARATOR);
        }
        out.push_str(trimmed);
        first = false;
    }

    out
}

/// Strip `prefix` from `path` when the path equals it or continues with a
/// separator right after it.
///
/// The returned remainder keeps its leading separator; an exact match yields
/// `/`. A prefix of `/` matches every absolute path and leaves it unchanged.
pub(crate) fn strip_segment_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let prefix = prefix.trim_end_matches(is_separator);
    if prefix.is_empty() {
        return path.starts_with(is_separator).then_some(path);
    }

    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with(is_separator) {
        Some(rest)
    } else {
        None
    }
}
