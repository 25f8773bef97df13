/// Destination filename used when a local path carries no separator at all.
pub(crate) const FALLBACK_UPLOAD_NAME: &str = "null.xlsx";

/// Replaces backslashes with forward slashes and collapses every run of
/// repeated slashes to a single one. Idempotent.
pub(crate) fn normalize_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        let c = if c == '\\' { '/' } else { c };
        if c == '/' {
            if !prev_slash {
                out.push(c);
            }
            prev_slash = true;
        } else {
            out.push(c);
            prev_slash = false;
        }
    }
    out
}

/// Derives the destination filename for an upload: the part of the local
/// path after its last separator, `/` or `\`. Falls back to
/// [`FALLBACK_UPLOAD_NAME`] when the path contains neither.
pub(crate) fn derive_upload_name(local_path: &str) -> &str {
    match local_path.rfind(['/', '\\']) {
        Some(idx) => &local_path[idx + 1..],
        None => FALLBACK_UPLOAD_NAME,
    }
}

/// Splits a normalized remote path into its parent directory and bare
/// filename. Returns `None` when the path contains no `/`. An empty
/// parent (a path directly under the root) maps to `/`.
pub(crate) fn split_remote_path(path: &str) -> Option<(&str, &str)> {
    let (dir, name) = path.rsplit_once('/')?;
    if dir.is_empty() {
        Some(("/", name))
    } else {
        Some((dir, name))
    }
}
