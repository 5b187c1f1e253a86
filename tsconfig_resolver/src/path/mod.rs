//! Lexical path helpers operating on `/`-separated strings.
//!
//! Every path leaving this module has its separators canonicalised with
//! [`normalize_path`], so results are comparable with plain string equality
//! regardless of the platform that produced the input. None of the helpers
//! touch the file system.

use camino::{Utf8Path, Utf8PathBuf};

/// Replace every run of `/` or `\` with a single `/`.
///
/// The function is idempotent: normalising an already normalised path
/// returns it unchanged.
///
/// # Examples
///
/// ```
/// use tsconfig_resolver::normalize_path;
///
/// assert_eq!(normalize_path(r"C:\\work//app\tsconfig.json"), "C:/work/app/tsconfig.json");
/// assert_eq!(normalize_path("/srv/app"), "/srv/app");
/// ```
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());
    let mut previous_was_separator = false;
    for ch in path.chars() {
        if matches!(ch, '/' | '\\') {
            if !previous_was_separator {
                normalized.push('/');
            }
            previous_was_separator = true;
        } else {
            normalized.push(ch);
            previous_was_separator = false;
        }
    }
    normalized
}

fn has_drive_prefix(path: &str) -> bool {
    matches!(path.as_bytes(), [drive, b':', ..] if drive.is_ascii_alphabetic())
}

/// Split a normalised path into its root (`/`, `C:/` or empty) and the rest.
pub(crate) fn split_root(path: &str) -> (String, &str) {
    if let Some(rest) = path.strip_prefix('/') {
        return (String::from("/"), rest);
    }
    if has_drive_prefix(path) {
        let mut chars = path.chars();
        let drive = chars.next().map(|c| c.to_ascii_uppercase()).unwrap_or('C');
        // Skip the colon and an optional separator.
        chars.next();
        let rest = chars.as_str();
        return (format!("{drive}:/"), rest.strip_prefix('/').unwrap_or(rest));
    }
    (String::new(), path)
}

/// Report whether `path` is rooted (`/…` or a Windows drive path).
#[must_use]
pub fn is_absolute(path: &str) -> bool {
    let normalized = normalize_path(path);
    normalized.starts_with('/') || has_drive_prefix(&normalized)
}

/// Lexically resolve `path` against `base`.
///
/// Absolute inputs ignore `base`. `.` segments are dropped and `..` segments
/// remove the preceding segment without ever climbing above the root.
///
/// ```
/// use tsconfig_resolver::path::resolve;
///
/// assert_eq!(resolve("/work/app", "../lib/./tsconfig.json"), "/work/lib/tsconfig.json");
/// assert_eq!(resolve("/work/app", "/etc/tsconfig.json"), "/etc/tsconfig.json");
/// ```
#[must_use]
pub fn resolve(base: impl AsRef<str>, path: impl AsRef<str>) -> Utf8PathBuf {
    let target = path.as_ref();
    let joined = if is_absolute(target) {
        normalize_path(target)
    } else {
        normalize_path(&format!("{}/{target}", base.as_ref()))
    };
    let (root, rest) = split_root(&joined);
    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if root.is_empty() {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }
    let mut resolved = root;
    resolved.push_str(&segments.join("/"));
    if resolved.is_empty() {
        resolved.push('.');
    }
    Utf8PathBuf::from(resolved)
}

/// Join `name` onto `directory` and normalise the separators.
#[must_use]
pub fn join(directory: &Utf8Path, name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(normalize_path(&format!("{directory}/{name}")))
}

/// Return the parent directory of `path`.
///
/// The parent of a root is the root itself, which is what lets the upward
/// search detect that it cannot climb any further.
#[must_use]
pub fn dirname(path: impl AsRef<str>) -> Utf8PathBuf {
    let normalized = normalize_path(path.as_ref());
    let (root, rest) = split_root(&normalized);
    let trimmed = rest.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((head, _)) => Utf8PathBuf::from(format!("{root}{head}")),
        None if root.is_empty() => Utf8PathBuf::from("."),
        None => Utf8PathBuf::from(root),
    }
}

/// Return the final component of `path`, or an empty string for a root.
#[must_use]
pub fn basename(path: &str) -> &str {
    path.trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
}
