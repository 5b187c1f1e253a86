//! Temporary project trees.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A directory tree living in a temporary directory.
///
/// The root is canonicalised, so paths reported by the file system (for
/// example the working directory) compare equal to [`ProjectTree::path`].
/// Separators are always `/`.
///
/// ```
/// use tsconfig_resolver_test_helpers::tree::ProjectTree;
///
/// let tree = ProjectTree::new()?
///     .with_file("tsconfig.json", "{}")?
///     .with_file("src/index.ts", "")?;
/// assert!(tree.path("src/index.ts").as_std_path().is_file());
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct ProjectTree {
    root: Utf8PathBuf,
    _temp: TempDir,
}

impl ProjectTree {
    /// Create an empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created or its
    /// path is not valid UTF-8.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("create temp dir")?;
        let canonical = dunce::canonicalize(temp.path()).context("canonicalise temp dir")?;
        let root = Utf8PathBuf::from_path_buf(canonical)
            .map_err(|path| anyhow!("temp dir is not UTF-8: {}", path.display()))?;
        Ok(Self {
            root: Utf8PathBuf::from(root.as_str().replace('\\', "/")),
            _temp: temp,
        })
    }

    /// Root of the tree.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of `relative` inside the tree.
    #[must_use]
    pub fn path(&self, relative: &str) -> Utf8PathBuf {
        if relative.is_empty() || relative == "." {
            return self.root.clone();
        }
        Utf8PathBuf::from(format!("{}/{}", self.root, relative.trim_start_matches("./")))
    }

    /// Write `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or the file cannot be written.
    pub fn with_file(self, relative: &str, contents: &str) -> Result<Self> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(self)
    }

    /// Create the directory `relative` and its parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_dir(self, relative: &str) -> Result<Self> {
        let path = self.path(relative);
        std::fs::create_dir_all(&path).with_context(|| format!("create {path}"))?;
        Ok(self)
    }
}
