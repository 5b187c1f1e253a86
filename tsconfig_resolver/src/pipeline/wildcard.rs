//! Translation of `include`/`exclude` patterns into regular expressions.
//!
//! Patterns are absolute, `/`-separated paths whose components may use `*`
//! (any run of characters), `?` (one character) and `**` (any number of
//! directories). Wildcards never match a leading `.`, so hidden entries are
//! only reached through literal components.

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;

use crate::path::{resolve, split_root};

/// A compiled `include` pattern.
#[derive(Debug, Clone)]
pub(super) struct IncludePattern {
    regex: Regex,
    /// Deepest directory that can be walked without consulting wildcards.
    base: Utf8PathBuf,
}

impl IncludePattern {
    /// Compile `spec`, resolved against `directory`.
    ///
    /// A final component that has no wildcard and no extension names a
    /// directory and matches everything beneath it.
    pub(super) fn new(spec: &str, directory: &Utf8Path) -> Option<Self> {
        let absolute = resolve(directory, spec);
        let (root, rest) = split_root(absolute.as_str());
        let mut components: Vec<&str> = rest.split('/').filter(|c| !c.is_empty()).collect();
        match components.last().copied() {
            Some("**") => components.push("*"),
            Some(last) if !has_wildcard(last) && !last.contains('.') => {
                components.extend(["**", "*"]);
            }
            _ => {}
        }

        let literal: Vec<&str> = components
            .iter()
            .copied()
            .take_while(|component| !has_wildcard(component))
            .collect();
        // A fully literal pattern names a file; walk its directory.
        let walk_depth = if literal.len() == components.len() {
            literal.len().saturating_sub(1)
        } else {
            literal.len()
        };
        let base = Utf8PathBuf::from(format!(
            "{root}{}",
            literal.iter().take(walk_depth).copied().collect::<Vec<_>>().join("/")
        ));

        let source = format!("^{}$", pattern_body(&root, &components));
        match Regex::new(&source) {
            Ok(regex) => Some(Self { regex, base }),
            Err(err) => {
                tracing::warn!(spec, error = %err, "ignoring include pattern");
                None
            }
        }
    }

    pub(super) fn matches(&self, path: &Utf8Path) -> bool {
        self.regex.is_match(path.as_str())
    }

    pub(super) fn base(&self) -> &Utf8Path {
        &self.base
    }
}

/// A compiled set of `exclude` patterns.
///
/// A path is excluded when it, or one of its ancestors, matches a pattern.
#[derive(Debug, Clone)]
pub(super) struct ExcludeSet {
    regex: Option<Regex>,
}

impl ExcludeSet {
    /// Compile `specs`, each resolved against `directory`.
    pub(super) fn new<'a>(specs: impl IntoIterator<Item = &'a str>, directory: &Utf8Path) -> Self {
        let alternatives: Vec<String> = specs
            .into_iter()
            .map(|spec| {
                let absolute = resolve(directory, spec);
                let (root, rest) = split_root(absolute.as_str());
                let components: Vec<&str> = rest.split('/').filter(|c| !c.is_empty()).collect();
                pattern_body(&root, &components)
            })
            .collect();
        if alternatives.is_empty() {
            return Self { regex: None };
        }
        let source = format!("^(?:{})(?:$|/)", alternatives.join("|"));
        let regex = Regex::new(&source)
            .inspect_err(|err| tracing::warn!(error = %err, "ignoring exclude patterns"))
            .ok();
        Self { regex }
    }

    pub(super) fn excludes(&self, path: &Utf8Path) -> bool {
        self.regex.as_ref().is_some_and(|regex| regex.is_match(path.as_str()))
    }
}

fn has_wildcard(component: &str) -> bool {
    component.contains(['*', '?'])
}

fn pattern_body(root: &str, components: &[&str]) -> String {
    let mut body = regex::escape(root.trim_end_matches('/'));
    for component in components {
        if *component == "**" {
            body.push_str("(?:/[^./][^/]*)*");
        } else {
            body.push('/');
            body.push_str(&component_pattern(component));
        }
    }
    if body.is_empty() {
        body.push('/');
    }
    body
}

fn component_pattern(component: &str) -> String {
    let mut pattern = String::new();
    for (index, ch) in component.chars().enumerate() {
        match (ch, index) {
            ('*', 0) => pattern.push_str("(?:[^./][^/]*)?"),
            ('*', _) => pattern.push_str("[^/]*"),
            ('?', 0) => pattern.push_str("[^./]"),
            ('?', _) => pattern.push_str("[^/]"),
            (literal, _) => {
                let mut buffer = [0_u8; 4];
                pattern.push_str(&regex::escape(literal.encode_utf8(&mut buffer)));
            }
        }
    }
    pattern
}
