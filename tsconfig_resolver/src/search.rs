//! Upward directory search.

use camino::{Utf8Path, Utf8PathBuf};

use crate::path::dirname;

/// Walk from `start_directory` towards the file-system root, returning the
/// first value produced by `probe`.
///
/// Each directory is probed before the stop check, so a hit in
/// `stop_directory` itself is still returned. The walk ends without a value
/// once `stop_directory` has been probed or the root has been reached. A
/// `stop_directory` that is not an ancestor of `start_directory` is never
/// reached and therefore behaves as if it were absent.
///
/// Directories are compared as normalised strings, so callers should pass
/// paths produced by [`crate::path::resolve`].
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use tsconfig_resolver::search_up;
///
/// let mut visited = Vec::new();
/// let hit = search_up(Utf8Path::new("/a/b/c"), Some(Utf8Path::new("/a")), |dir| {
///     visited.push(dir.to_string());
///     None::<()>
/// });
/// assert!(hit.is_none());
/// assert_eq!(visited, ["/a/b/c", "/a/b", "/a"]);
/// ```
pub fn search_up<T, F>(
    start_directory: &Utf8Path,
    stop_directory: Option<&Utf8Path>,
    mut probe: F,
) -> Option<T>
where
    F: FnMut(&Utf8Path) -> Option<T>,
{
    let mut current: Utf8PathBuf = start_directory.to_path_buf();
    loop {
        tracing::trace!(directory = %current, "probing directory");
        if let Some(found) = probe(&current) {
            return Some(found);
        }
        if stop_directory.is_some_and(|stop| stop == current.as_path()) {
            tracing::trace!(directory = %current, "reached stop directory");
            return None;
        }
        let parent = dirname(current.as_str());
        if parent == current {
            return None;
        }
        current = parent;
    }
}
