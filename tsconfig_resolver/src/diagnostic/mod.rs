//! Structured diagnostics returned in place of errors.
//!
//! Every public operation in this crate reports failures as [`Diagnostic`]
//! values collected into [`Diagnostics`]. Diagnostics are plain values: they
//! can be cloned, compared and rendered, and never panic when inspected.

mod aggregate;
pub mod codes;
mod source_file;

use std::fmt;

use camino::Utf8Path;
use thiserror::Error;

use crate::host::FileSystem;

pub use aggregate::{DiagnosticResult, Diagnostics};
pub use source_file::SourceFile;

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    /// Something worth flagging that does not stop resolution.
    Warning,
    /// A failure; the operation did not produce a result.
    #[default]
    Error,
    /// An optional improvement.
    Suggestion,
    /// Informational output.
    Message,
}

impl DiagnosticCategory {
    /// Lower-case label used when rendering diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Suggestion => "suggestion",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric diagnostic code.
///
/// [`DiagnosticCode::NONE`] marks a diagnostic that carries no code. It uses
/// a value no producer in this crate ever emits, so tooling branching on codes
/// cannot confuse it with a real one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct DiagnosticCode(i32);

impl DiagnosticCode {
    /// Sentinel for "no code".
    pub const NONE: Self = Self(i32::MIN);

    /// Wrap a raw code.
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// The raw code, or `None` for [`DiagnosticCode::NONE`].
    #[must_use]
    pub const fn value(self) -> Option<i32> {
        if self.0 == Self::NONE.0 {
            None
        } else {
            Some(self.0)
        }
    }

    /// Whether this is the [`DiagnosticCode::NONE`] sentinel.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }
}

impl Default for DiagnosticCode {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<i32> for DiagnosticCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

/// A single error, warning or informational record.
///
/// Construct one with [`Diagnostic::new`] and refine it with the `with_*`
/// builders:
///
/// ```
/// use tsconfig_resolver::diagnostic::{codes, Diagnostic, DiagnosticCategory};
///
/// let diagnostic = Diagnostic::new("Cannot read file 'tsconfig.json'.")
///     .with_code(codes::CANNOT_READ_FILE);
/// assert_eq!(diagnostic.category(), DiagnosticCategory::Error);
/// assert_eq!(diagnostic.code().value(), Some(5083));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}{}: {message_text}", file_prefix(.file), heading(.category, .code))]
pub struct Diagnostic {
    message_text: String,
    code: DiagnosticCode,
    category: DiagnosticCategory,
    file: Option<SourceFile>,
    start: Option<usize>,
    length: Option<usize>,
}

fn file_prefix(file: &Option<SourceFile>) -> String {
    file.as_ref().map_or_else(String::new, |source| format!("{}: ", source.file_name()))
}

fn heading(category: &DiagnosticCategory, code: &DiagnosticCode) -> String {
    code.value()
        .map_or_else(|| category.to_string(), |value| format!("{category} TS{value}"))
}

impl Diagnostic {
    /// Create an uncoded error diagnostic.
    #[must_use]
    pub fn new(message_text: impl Into<String>) -> Self {
        Self {
            message_text: message_text.into(),
            code: DiagnosticCode::NONE,
            category: DiagnosticCategory::Error,
            file: None,
            start: None,
            length: None,
        }
    }

    /// Set the numeric code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<DiagnosticCode>) -> Self {
        self.code = code.into();
        self
    }

    /// Set the category.
    #[must_use]
    pub const fn with_category(mut self, category: DiagnosticCategory) -> Self {
        self.category = category;
        self
    }

    /// Attribute the diagnostic to an already loaded file.
    #[must_use]
    pub fn with_file(mut self, file: SourceFile) -> Self {
        self.file = Some(file);
        self
    }

    /// Attribute the diagnostic to the file at `path`, loading it through
    /// `host`.
    ///
    /// Loading is best effort: an unreadable file still yields a
    /// [`SourceFile`] with empty text so the attribution is preserved.
    #[must_use]
    pub fn with_file_path(self, path: &Utf8Path, host: &dyn FileSystem) -> Self {
        self.with_file(SourceFile::load(path, host))
    }

    /// Record the byte span the diagnostic refers to within its file.
    #[must_use]
    pub const fn with_span(mut self, start: usize, length: usize) -> Self {
        self.start = Some(start);
        self.length = Some(length);
        self
    }

    /// Human-readable message.
    #[must_use]
    pub fn message_text(&self) -> &str {
        &self.message_text
    }

    /// Numeric code, possibly [`DiagnosticCode::NONE`].
    #[must_use]
    pub const fn code(&self) -> DiagnosticCode {
        self.code
    }

    /// Severity.
    #[must_use]
    pub const fn category(&self) -> DiagnosticCategory {
        self.category
    }

    /// File the diagnostic is attributed to, if any.
    #[must_use]
    pub const fn file(&self) -> Option<&SourceFile> {
        self.file.as_ref()
    }

    /// Byte offset of the span start within [`Diagnostic::file`].
    #[must_use]
    pub const fn start(&self) -> Option<usize> {
        self.start
    }

    /// Byte length of the span within [`Diagnostic::file`].
    #[must_use]
    pub const fn length(&self) -> Option<usize> {
        self.length
    }
}

#[cfg(test)]
mod tests;
