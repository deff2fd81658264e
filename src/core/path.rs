//! Path resolution against a working directory
//!
//! Pure string manipulation. Existence is checked by callers against
//! [`VirtualFs`](super::fs::VirtualFs).

/// Resolve `path_arg` relative to `cwd` into a canonical absolute path.
///
/// The result always starts with `/`, has no empty, `.` or `..` segments,
/// and no trailing slash unless it is the root itself.
pub fn resolve(path_arg: &str, cwd: &str) -> String {
    if path_arg.starts_with('/') {
        return canonicalize(path_arg);
    }
    match path_arg {
        "." => canonicalize(cwd),
        ".." => {
            let mut parts: Vec<&str> = cwd.split('/').filter(|s| !s.is_empty()).collect();
            parts.pop();
            format!("/{}", parts.join("/"))
        }
        _ => canonicalize(&format!("{}/{}", cwd, path_arg)),
    }
}

/// Collapse slash runs, drop trailing slash, fold `.` and `..` segments.
pub fn canonicalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    format!("/{}", parts.join("/"))
}
