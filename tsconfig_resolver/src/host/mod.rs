//! File-system access used by the resolver.
//!
//! The resolver only needs a handful of primitives, captured by the
//! [`FileSystem`] trait. [`OsFileSystem`] talks to the real file system and
//! [`MemoryFileSystem`] serves an in-memory tree, which keeps tests hermetic
//! and lets embedders resolve configurations that never touch disk.

mod memory;
mod os;

use camino::{Utf8Path, Utf8PathBuf};

pub use memory::MemoryFileSystem;
pub use os::OsFileSystem;

/// Names found directly inside a directory, each list sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryEntries {
    /// Regular files.
    pub files: Vec<String>,
    /// Sub-directories.
    pub directories: Vec<String>,
}

/// Primitive file-system operations consumed by the resolver.
///
/// Paths handed to implementations are absolute and use `/` separators.
/// Implementations report absence rather than errors: a missing or
/// unreadable entry is simply `false` or `None`.
pub trait FileSystem: Send + Sync {
    /// Whether `path` names an existing regular file.
    fn file_exists(&self, path: &Utf8Path) -> bool;

    /// Whether `path` names an existing directory.
    fn directory_exists(&self, path: &Utf8Path) -> bool;

    /// Read `path` as UTF-8 text.
    fn read_file(&self, path: &Utf8Path) -> Option<String>;

    /// List the files and directories directly inside `path`.
    fn read_directory(&self, path: &Utf8Path) -> DirectoryEntries;

    /// Directory relative paths are resolved against.
    fn current_directory(&self) -> Utf8PathBuf;
}
