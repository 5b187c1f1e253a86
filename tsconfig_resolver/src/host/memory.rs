//! In-memory file tree.

use std::collections::{BTreeMap, BTreeSet};

use camino::{Utf8Path, Utf8PathBuf};

use super::{DirectoryEntries, FileSystem};
use crate::path::{basename, dirname, resolve};

/// [`FileSystem`] serving files from memory.
///
/// Relative paths given to the builders are resolved against the current
/// directory, and every ancestor of an added entry is registered as a
/// directory.
///
/// ```
/// use camino::Utf8Path;
/// use tsconfig_resolver::host::{FileSystem, MemoryFileSystem};
///
/// let host = MemoryFileSystem::new("/repo")
///     .with_file("tsconfig.json", "{}")
///     .with_file("src/index.ts", "");
/// assert!(host.file_exists(Utf8Path::new("/repo/src/index.ts")));
/// assert!(host.directory_exists(Utf8Path::new("/repo/src")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    current_directory: Utf8PathBuf,
    files: BTreeMap<Utf8PathBuf, String>,
    directories: BTreeSet<Utf8PathBuf>,
}

impl MemoryFileSystem {
    /// Create an empty tree whose current directory is `current_directory`.
    #[must_use]
    pub fn new(current_directory: impl AsRef<str>) -> Self {
        let cwd = resolve("/", current_directory);
        let mut host = Self {
            current_directory: cwd.clone(),
            ..Self::default()
        };
        host.register_directory(cwd);
        host
    }

    /// Add a file (and its ancestors).
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<str>, contents: impl Into<String>) -> Self {
        let absolute = resolve(&self.current_directory, path);
        self.register_directory(dirname(absolute.as_str()));
        self.files.insert(absolute, contents.into());
        self
    }

    /// Add an empty directory (and its ancestors).
    #[must_use]
    pub fn with_directory(mut self, path: impl AsRef<str>) -> Self {
        let absolute = resolve(&self.current_directory, path);
        self.register_directory(absolute);
        self
    }

    fn register_directory(&mut self, directory: Utf8PathBuf) {
        let mut current = directory;
        loop {
            let parent = dirname(current.as_str());
            let is_root = parent == current;
            if !self.directories.insert(current) || is_root {
                break;
            }
            current = parent;
        }
    }

    fn normalise(&self, path: &Utf8Path) -> Utf8PathBuf {
        resolve(&self.current_directory, path.as_str())
    }
}

impl FileSystem for MemoryFileSystem {
    fn file_exists(&self, path: &Utf8Path) -> bool {
        self.files.contains_key(&self.normalise(path))
    }

    fn directory_exists(&self, path: &Utf8Path) -> bool {
        self.directories.contains(&self.normalise(path))
    }

    fn read_file(&self, path: &Utf8Path) -> Option<String> {
        self.files.get(&self.normalise(path)).cloned()
    }

    fn read_directory(&self, path: &Utf8Path) -> DirectoryEntries {
        let directory = self.normalise(path);
        let is_child = |candidate: &Utf8PathBuf| {
            candidate != &directory && dirname(candidate.as_str()) == directory
        };
        DirectoryEntries {
            files: self
                .files
                .keys()
                .filter(|file| is_child(file))
                .map(|file| basename(file.as_str()).to_owned())
                .collect(),
            directories: self
                .directories
                .iter()
                .filter(|dir| is_child(dir))
                .map(|dir| basename(dir.as_str()).to_owned())
                .collect(),
        }
    }

    fn current_directory(&self) -> Utf8PathBuf {
        self.current_directory.clone()
    }
}
