//! Locating and resolving configuration files.

mod options;

use camino::Utf8PathBuf;
use serde_json::Value;

use crate::diagnostic::{Diagnostic, DiagnosticResult, Diagnostics, codes};
use crate::host::{FileSystem, OsFileSystem};
use crate::parser::parse_config_text;
use crate::path::{dirname, join};
use crate::pipeline::{CompilerOptions, merge_and_validate};
use crate::search::search_up;

pub use options::{
    DEFAULT_CONFIG_FILE_NAME, NormalizedSearch, ResolveOptions, SearchOptions, normalize_options,
};

/// A configuration that was found, parsed, merged and validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Absolute path of the configuration file.
    pub config_file_path: Utf8PathBuf,
    /// Effective compiler options.
    pub options: CompilerOptions,
    /// Absolute input files.
    pub file_names: Vec<Utf8PathBuf>,
    /// The configuration document as written.
    pub raw: Value,
    /// Configuration files pulled in through `extends`.
    pub extended_config_paths: Vec<Utf8PathBuf>,
    /// Always empty: any problem turns the resolution into an error.
    pub errors: Vec<Diagnostic>,
}

/// Search the real file system for a configuration file.
///
/// # Errors
///
/// See [`find_config_file_with`].
pub fn find_config_file(options: &SearchOptions) -> DiagnosticResult<Utf8PathBuf> {
    find_config_file_with(options, &OsFileSystem)
}

/// Search `host` for the configuration file described by `options`.
///
/// The search starts in the directory holding `file_path` and climbs towards
/// the root, stopping after the stop directory when one is given.
///
/// ```
/// use tsconfig_resolver::host::MemoryFileSystem;
/// use tsconfig_resolver::{SearchOptions, find_config_file_with};
///
/// let host = MemoryFileSystem::new("/repo/packages/app").with_file("/repo/tsconfig.json", "{}");
/// let found = find_config_file_with(&SearchOptions::default(), &host);
/// assert_eq!(found.ok().as_deref().map(|p| p.as_str()), Some("/repo/tsconfig.json"));
/// ```
///
/// # Errors
///
/// Returns the diagnostic raised by [`normalize_options`], or code `5081`
/// when no directory on the walk contains the file. The not-found message
/// names the directory the search started from.
pub fn find_config_file_with(
    options: &SearchOptions,
    host: &dyn FileSystem,
) -> DiagnosticResult<Utf8PathBuf> {
    let search = normalize_options(options, host)?;
    let found = search_up(search.start_directory(), search.stop_directory(), |directory| {
        let candidate = join(directory, search.file_name());
        host.file_exists(&candidate).then_some(candidate)
    });
    match found {
        Some(path) => {
            tracing::debug!(path = %path, "found configuration file");
            Ok(path)
        }
        None => {
            tracing::debug!(
                file = search.file_name(),
                start = %search.start_directory(),
                "configuration file not found"
            );
            Err(Diagnostic::new(format!(
                "Cannot find a '{}' file at the current directory: '{}'.",
                search.file_name(),
                search.start_directory()
            ))
            .with_code(codes::CANNOT_FIND_CONFIG_FILE)
            .into())
        }
    }
}

/// Find and resolve a configuration on the real file system.
///
/// # Errors
///
/// See [`resolve_config_with`].
pub fn resolve_config(options: &ResolveOptions) -> DiagnosticResult<ResolvedConfig> {
    resolve_config_with(options, &OsFileSystem)
}

/// Find, read, parse, merge and validate a configuration through `host`.
///
/// # Errors
///
/// Stops at the first failing stage and returns its diagnostics untouched:
/// the search diagnostics, code `5083` for an empty or unreadable file, the
/// parser's syntax error, or every problem found while merging and
/// validating (including a configuration that matches no input files).
pub fn resolve_config_with(
    options: &ResolveOptions,
    host: &dyn FileSystem,
) -> DiagnosticResult<ResolvedConfig> {
    let config_file_path = find_config_file_with(options.search(), host)?;

    let text = match host.read_file(&config_file_path) {
        Some(text) if !text.is_empty() => text,
        _ => {
            tracing::debug!(path = %config_file_path, "configuration file is empty or unreadable");
            return Err(Diagnostic::new(format!("Cannot read file '{config_file_path}'."))
                .with_code(codes::CANNOT_READ_FILE)
                .with_file_path(&config_file_path, host)
                .into());
        }
    };

    let parsed = parse_config_text(&config_file_path, &text);
    if let Some(error) = parsed.error {
        return Err(error.into());
    }

    let overrides = options.compiler_option_overrides();
    let command_line = merge_and_validate(
        &parsed.value,
        host,
        &dirname(config_file_path.as_str()),
        (!overrides.is_empty()).then_some(overrides),
        &config_file_path,
    );
    if let Some(diagnostics) = Diagnostics::from_vec(command_line.errors) {
        tracing::debug!(
            path = %config_file_path,
            count = diagnostics.len(),
            "configuration failed validation"
        );
        return Err(diagnostics);
    }

    tracing::debug!(
        path = %config_file_path,
        files = command_line.file_names.len(),
        "configuration resolved"
    );
    Ok(ResolvedConfig {
        config_file_path,
        options: command_line.options,
        file_names: command_line.file_names,
        raw: command_line.raw,
        extended_config_paths: command_line.extended_config_paths,
        errors: Vec::new(),
    })
}

#[cfg(test)]
mod tests;
