//! Search and resolve options, and their normalisation.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value};

use crate::diagnostic::{Diagnostic, DiagnosticResult, codes};
use crate::host::FileSystem;
use crate::path::{basename, dirname, is_absolute, resolve};

/// File name looked up when none is configured.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "tsconfig.json";

/// What to look for and where.
///
/// `file_path` may carry directories: `packages/app/tsconfig.json` starts the
/// search in `packages/app` and looks for `tsconfig.json` from there upwards.
/// Empty start or stop directories count as unset.
///
/// ```
/// use tsconfig_resolver::SearchOptions;
///
/// let options = SearchOptions::new("tsconfig.build.json")
///     .with_start_directory("packages/app")
///     .with_stop_directory("/work")
///     .require_start_directory(true);
/// assert_eq!(options.file_path(), "tsconfig.build.json");
/// assert_eq!(options.start_directory(), Some("packages/app"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    file_path: String,
    start_directory: Option<String>,
    stop_directory: Option<String>,
    start_directory_should_exist: bool,
}

impl SearchOptions {
    /// Search for `file_path`.
    #[must_use]
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            start_directory: None,
            stop_directory: None,
            start_directory_should_exist: false,
        }
    }

    /// Directory `file_path` is relative to; defaults to the host's current
    /// directory.
    #[must_use]
    pub fn with_start_directory(mut self, directory: impl Into<String>) -> Self {
        self.start_directory = Some(directory.into());
        self
    }

    /// Last directory examined by the upward search.
    #[must_use]
    pub fn with_stop_directory(mut self, directory: impl Into<String>) -> Self {
        self.stop_directory = Some(directory.into());
        self
    }

    /// Fail instead of searching when the start directory is missing.
    #[must_use]
    pub const fn require_start_directory(mut self, required: bool) -> Self {
        self.start_directory_should_exist = required;
        self
    }

    /// The configured file path.
    #[must_use]
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// The configured start directory, if any.
    #[must_use]
    pub fn start_directory(&self) -> Option<&str> {
        self.start_directory.as_deref().filter(|dir| !dir.is_empty())
    }

    /// The configured stop directory, if any.
    #[must_use]
    pub fn stop_directory(&self) -> Option<&str> {
        self.stop_directory.as_deref().filter(|dir| !dir.is_empty())
    }

    /// Whether a missing start directory is an error.
    #[must_use]
    pub const fn start_directory_should_exist(&self) -> bool {
        self.start_directory_should_exist
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE_NAME)
    }
}

/// A validated search: absolute directories and a bare file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSearch {
    file_name: String,
    start_directory: Utf8PathBuf,
    stop_directory: Option<Utf8PathBuf>,
    require_start_directory_exists: bool,
}

impl NormalizedSearch {
    /// Name probed in each directory.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// First directory probed.
    #[must_use]
    pub fn start_directory(&self) -> &Utf8Path {
        &self.start_directory
    }

    /// Last directory probed, if bounded.
    #[must_use]
    pub fn stop_directory(&self) -> Option<&Utf8Path> {
        self.stop_directory.as_deref()
    }

    /// Whether the start directory was required to exist.
    #[must_use]
    pub const fn require_start_directory_exists(&self) -> bool {
        self.require_start_directory_exists
    }
}

/// Validate `options` and make every path absolute.
///
/// Relative paths are resolved against `host`'s current directory. The
/// start-directory consistency check runs before the existence check, and
/// each failure yields exactly one diagnostic.
///
/// # Errors
///
/// Returns a diagnostic with code `-100` when an absolute `file_path`
/// disagrees with an explicit start directory, or code `6148` when the start
/// directory must exist but does not.
pub fn normalize_options(
    options: &SearchOptions,
    host: &dyn FileSystem,
) -> DiagnosticResult<NormalizedSearch> {
    let cwd = host.current_directory();
    let provided_start = options.start_directory().map(|dir| resolve(&cwd, dir));
    let anchor = provided_start.as_deref().unwrap_or(cwd.as_path());
    let config_path = resolve(anchor, options.file_path());
    let start_directory = dirname(config_path.as_str());

    if let Some(provided) = &provided_start
        && is_absolute(options.file_path())
        && provided != &start_directory
    {
        return Err(Diagnostic::new(format!(
            "Do not specify the 'start_directory' option if you give an absolute 'file_path' or they must be equal. Expected '{start_directory}', received '{provided}'."
        ))
        .with_code(codes::OPTIONS_MISMATCH)
        .into());
    }

    if options.start_directory_should_exist() && !host.directory_exists(&start_directory) {
        return Err(Diagnostic::new(format!(
            "Directory '{start_directory}' does not exist, skipping all lookups in it."
        ))
        .with_code(codes::DIRECTORY_DOES_NOT_EXIST)
        .into());
    }

    Ok(NormalizedSearch {
        file_name: basename(config_path.as_str()).to_owned(),
        stop_directory: options.stop_directory().map(|dir| resolve(&cwd, dir)),
        start_directory,
        require_start_directory_exists: options.start_directory_should_exist(),
    })
}

/// Options for [`resolve_config`](crate::resolve_config).
///
/// The search defaults to `tsconfig.json` from the current directory.
/// Compiler options added here are validated like those in the file and win
/// over every value the file or its bases set.
///
/// ```
/// use serde_json::json;
/// use tsconfig_resolver::ResolveOptions;
///
/// let options = ResolveOptions::new()
///     .with_file_path("tsconfig.build.json")
///     .with_compiler_option("noEmit", json!(true));
/// assert_eq!(options.search().file_path(), "tsconfig.build.json");
/// assert_eq!(options.compiler_option_overrides().get("noEmit"), Some(&json!(true)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveOptions {
    search: SearchOptions,
    compiler_option_overrides: Map<String, Value>,
}

impl ResolveOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the file path searched for.
    #[must_use]
    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.search.file_path = file_path.into();
        self
    }

    /// See [`SearchOptions::with_start_directory`].
    #[must_use]
    pub fn with_start_directory(mut self, directory: impl Into<String>) -> Self {
        self.search = self.search.with_start_directory(directory);
        self
    }

    /// See [`SearchOptions::with_stop_directory`].
    #[must_use]
    pub fn with_stop_directory(mut self, directory: impl Into<String>) -> Self {
        self.search = self.search.with_stop_directory(directory);
        self
    }

    /// See [`SearchOptions::require_start_directory`].
    #[must_use]
    pub const fn require_start_directory(mut self, required: bool) -> Self {
        self.search.start_directory_should_exist = required;
        self
    }

    /// Override a single compiler option.
    #[must_use]
    pub fn with_compiler_option(mut self, name: impl Into<String>, value: Value) -> Self {
        self.compiler_option_overrides.insert(name.into(), value);
        self
    }

    /// Override several compiler options at once.
    #[must_use]
    pub fn with_compiler_options(mut self, options: Map<String, Value>) -> Self {
        self.compiler_option_overrides.extend(options);
        self
    }

    /// The search part of the options.
    #[must_use]
    pub const fn search(&self) -> &SearchOptions {
        &self.search
    }

    /// Compiler options applied after the configuration file.
    #[must_use]
    pub const fn compiler_option_overrides(&self) -> &Map<String, Value> {
        &self.compiler_option_overrides
    }
}

impl From<SearchOptions> for ResolveOptions {
    fn from(search: SearchOptions) -> Self {
        Self {
            search,
            compiler_option_overrides: Map::new(),
        }
    }
}
