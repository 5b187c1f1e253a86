//! File references attached to diagnostics.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};

use crate::host::FileSystem;

/// A configuration file a diagnostic is attributed to.
///
/// The text is shared, so cloning a diagnostic never copies file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    file_name: Utf8PathBuf,
    text: Arc<str>,
}

impl SourceFile {
    /// Wrap text that has already been read.
    #[must_use]
    pub fn new(file_name: impl Into<Utf8PathBuf>, text: impl Into<Arc<str>>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
        }
    }

    /// Load `path` through `host`, falling back to empty text when the file
    /// cannot be read.
    #[must_use]
    pub fn load(path: &Utf8Path, host: &dyn FileSystem) -> Self {
        let text = host.read_file(path).unwrap_or_else(|| {
            tracing::debug!(path = %path, "diagnostic source unreadable; using placeholder");
            String::new()
        });
        Self::new(path, text)
    }

    /// Path of the file.
    #[must_use]
    pub fn file_name(&self) -> &Utf8Path {
        &self.file_name
    }

    /// Contents of the file, empty for a placeholder.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
