//! Shared helpers for remote path handling.

/// Normalize a remote path: collapse `//`, resolve `.` and `..`, force a leading `/`.
///
/// The result never ends with `/` except for the root itself.
pub(crate) fn normalize_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    format!("/{}", parts.join("/"))
}

/// Normalize a remote directory path; directories always end with `/`.
pub(crate) fn normalize_dir(path: &str) -> String {
    let mut result = normalize_path(path);
    if !result.ends_with('/') {
        result.push('/');
    }
    result
}

/// Split a path into its parent directory and final component.
///
/// Trailing slashes are ignored. Returns `None` when there is no final component.
pub(crate) fn split_parent(path: &str) -> Option<(String, &str)> {
    let trimmed = path.trim_end_matches('/');
    let (parent, name) = trimmed.rsplit_once('/').unwrap_or(("", trimmed));
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some((normalize_dir(parent), name))
}
