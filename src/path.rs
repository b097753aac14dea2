//! Request path normalization.
//!
//! Both directions of the router run their paths through [`normalize_path`]:
//! incoming request paths before lookup, and reverse-resolved paths before
//! they are handed back. A path produced by [`Router::reverse`](crate::Router::reverse)
//! is therefore always in the form [`Router::dispatch`](crate::Router::dispatch) expects.

use std::borrow::Cow;

/// Cleans a URL path.
///
/// - An empty path becomes `/`; a relative path is rooted.
/// - Runs of `/` collapse to one.
/// - `.` segments are dropped; `..` removes the preceding segment and
///   cannot climb above the root.
/// - A trailing `/` survives when the original path had one, unless the
///   cleaned result is the root itself.
///
/// Already-clean paths are returned borrowed.
///
/// ```rust
/// use waymark::normalize_path;
///
/// assert_eq!(normalize_path("/a//b/./c/../d/"), "/a/b/d/");
/// assert_eq!(normalize_path("/../x"), "/x");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_clean(path) {
        return Cow::Borrowed(path);
    }

    let mut segments: Vec<&str> = Vec::new();
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut out = String::with_capacity(path.len() + 1);
    for seg in &segments {
        out.push('/');
        out.push_str(seg);
    }
    if out.is_empty() || path.ends_with('/') {
        out.push('/');
    }
    Cow::Owned(out)
}

fn is_clean(path: &str) -> bool {
    let Some(rest) = path.strip_prefix('/') else {
        return false;
    };
    if rest.is_empty() {
        return true;
    }
    // A trailing slash shows up as one empty final segment, which is fine.
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    rest.split('/').all(|seg| !matches!(seg, "" | "." | ".."))
}
