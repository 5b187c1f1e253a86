//! Ordered collections of diagnostics.

use std::fmt;

use thiserror::Error;

use super::Diagnostic;

/// Result alias used by every fallible public operation.
pub type DiagnosticResult<T> = Result<T, Diagnostics>;

/// Diagnostics produced by a single operation, in the order they were raised.
///
/// Entries are never merged or rewritten; callers can inspect the first and
/// every subsequent diagnostic exactly as the producing stage reported it.
///
/// ```
/// use tsconfig_resolver::diagnostic::{Diagnostic, Diagnostics};
///
/// let diagnostics = Diagnostics::from_vec(vec![
///     Diagnostic::new("first"),
///     Diagnostic::new("second"),
/// ])
/// .expect("non-empty");
/// assert_eq!(diagnostics.len(), 2);
/// assert_eq!(diagnostics.first().map(Diagnostic::message_text), Some("first"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", Listing(.0))]
pub struct Diagnostics(Vec<Diagnostic>);

struct Listing<'a>(&'a [Diagnostic]);

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, diagnostic) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

impl Diagnostics {
    /// Collect `diagnostics`, returning `None` when there are none.
    #[must_use]
    pub fn from_vec(diagnostics: Vec<Diagnostic>) -> Option<Self> {
        if diagnostics.is_empty() {
            None
        } else {
            Some(Self(diagnostics))
        }
    }

    /// First diagnostic raised.
    #[must_use]
    pub fn first(&self) -> Option<&Diagnostic> {
        self.0.first()
    }

    /// Iterate over every diagnostic in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Number of diagnostics.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for collections built through the public constructors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the diagnostics as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.0
    }

    /// Consume the collection.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
