//! Merge, validation and input-file expansion of a parsed configuration.
//!
//! [`merge_and_validate`] turns the value produced by
//! [`parse_config_text`](crate::parse_config_text) into a
//! [`ParsedCommandLine`]: the `extends` chain is loaded and layered, compiler
//! options are checked against the known option table, and the input files
//! are expanded from `files`, `include` and `exclude`.
//!
//! Problems never abort the pipeline. Each one becomes a [`Diagnostic`]
//! attributed to the configuration file that caused it, and the remaining
//! stages still run on whatever could be understood.

mod extends;
mod files;
mod options;
mod wildcard;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::diagnostic::{Diagnostic, codes};
use crate::host::FileSystem;

/// Result of running a configuration document through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommandLine {
    /// Effective compiler options after `extends` and overrides.
    pub options: CompilerOptions,
    /// Absolute input files, explicit `files` first.
    pub file_names: Vec<Utf8PathBuf>,
    /// The top-level document exactly as parsed.
    pub raw: Value,
    /// Every configuration file loaded through `extends`, in load order.
    pub extended_config_paths: Vec<Utf8PathBuf>,
    /// Problems found along the way, in discovery order.
    pub errors: Vec<Diagnostic>,
}

/// Validated compiler options keyed by their canonical name.
///
/// Path-valued options hold absolute, `/`-separated paths; enum-valued
/// options hold their lower-case spelling.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CompilerOptions(Map<String, Value>);

impl CompilerOptions {
    /// Look up an option by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Look up a boolean option.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Look up a string, path or enum option.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Number of options set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the options in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Borrow the underlying JSON map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the options, returning the underlying JSON map.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<CompilerOptions> for Value {
    fn from(options: CompilerOptions) -> Self {
        Self::Object(options.0)
    }
}

/// Path patterns declared by one configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PathSpecs {
    specs: Vec<String>,
    /// Directory of the declaring file; relative specs are anchored here.
    base: Utf8PathBuf,
}

/// The contribution of one configuration file, after its own bases.
#[derive(Debug, Clone, Default)]
struct ConfigLayer {
    compiler_options: Map<String, Value>,
    files: Option<PathSpecs>,
    include: Option<PathSpecs>,
    exclude: Option<PathSpecs>,
}

impl ConfigLayer {
    /// Lay `derived` over `self`.
    ///
    /// Options merge key by key and an explicit `null` clears the inherited
    /// value. The path lists are replaced wholesale.
    fn overlay(&mut self, derived: Self) {
        for (name, value) in derived.compiler_options {
            if value.is_null() {
                self.compiler_options.remove(&name);
            } else {
                self.compiler_options.insert(name, value);
            }
        }
        if derived.files.is_some() {
            self.files = derived.files;
        }
        if derived.include.is_some() {
            self.include = derived.include;
        }
        if derived.exclude.is_some() {
            self.exclude = derived.exclude;
        }
    }
}

/// Mutable state threaded through one pipeline run.
struct Resolution<'a> {
    host: &'a dyn FileSystem,
    diagnostics: Vec<Diagnostic>,
    /// Files currently being loaded, outermost first.
    stack: Vec<Utf8PathBuf>,
    extended: Vec<Utf8PathBuf>,
}

impl<'a> Resolution<'a> {
    fn new(host: &'a dyn FileSystem, config_file_path: &Utf8Path) -> Self {
        Self {
            host,
            diagnostics: Vec::new(),
            stack: vec![config_file_path.to_path_buf()],
            extended: Vec::new(),
        }
    }

    /// Record `diagnostic` against `file`.
    fn report(&mut self, diagnostic: Diagnostic, file: &Utf8Path) {
        self.diagnostics.push(diagnostic.with_file_path(file, self.host));
    }

    fn report_all(&mut self, diagnostics: Vec<Diagnostic>, file: &Utf8Path) {
        for diagnostic in diagnostics {
            self.report(diagnostic, file);
        }
    }
}

fn root_must_be_object(file: &Utf8Path) -> Diagnostic {
    Diagnostic::new(format!(
        "The root value of a '{}' file must be an object.",
        crate::path::basename(file.as_str())
    ))
    .with_code(codes::ROOT_MUST_BE_OBJECT)
}

fn type_mismatch(name: &str, expected: &str) -> Diagnostic {
    Diagnostic::new(format!(
        "Compiler option '{name}' requires a value of type {expected}."
    ))
    .with_code(codes::OPTION_TYPE_MISMATCH)
}

/// Merge `extends`, validate options and expand the input files.
///
/// `base_directory` anchors the default `include` and `exclude` patterns and
/// the `overrides`; it is normally the directory holding
/// `config_file_path`. Overrides use the same option table as the file and
/// are applied after the whole `extends` chain.
///
/// ```
/// use camino::Utf8Path;
/// use serde_json::json;
/// use tsconfig_resolver::host::MemoryFileSystem;
/// use tsconfig_resolver::pipeline::merge_and_validate;
///
/// let host = MemoryFileSystem::new("/repo").with_file("src/index.ts", "");
/// let parsed = merge_and_validate(
///     &json!({ "compilerOptions": { "strict": true } }),
///     &host,
///     Utf8Path::new("/repo"),
///     None,
///     Utf8Path::new("/repo/tsconfig.json"),
/// );
/// assert!(parsed.errors.is_empty());
/// assert_eq!(parsed.options.get_bool("strict"), Some(true));
/// assert_eq!(parsed.file_names, ["/repo/src/index.ts"]);
/// ```
#[must_use]
pub fn merge_and_validate(
    value: &Value,
    host: &dyn FileSystem,
    base_directory: &Utf8Path,
    overrides: Option<&Map<String, Value>>,
    config_file_path: &Utf8Path,
) -> ParsedCommandLine {
    let mut resolution = Resolution::new(host, config_file_path);
    let Some(document) = value.as_object() else {
        resolution.report(root_must_be_object(config_file_path), config_file_path);
        return ParsedCommandLine {
            options: CompilerOptions::default(),
            file_names: Vec::new(),
            raw: value.clone(),
            extended_config_paths: Vec::new(),
            errors: resolution.diagnostics,
        };
    };

    tracing::debug!(config = %config_file_path, "merging configuration");
    let mut layer = extends::build_layer(document, config_file_path, &mut resolution);
    if let Some(extra) = overrides {
        let (converted, problems) = options::convert_compiler_options(extra, base_directory);
        // Override problems have no source file of their own.
        resolution.diagnostics.extend(problems);
        layer.overlay(ConfigLayer {
            compiler_options: converted,
            ..ConfigLayer::default()
        });
    }
    let options = CompilerOptions(layer.compiler_options.clone());
    let file_names = files::expand(&layer, &options, base_directory, config_file_path, &mut resolution);
    tracing::debug!(
        config = %config_file_path,
        files = file_names.len(),
        errors = resolution.diagnostics.len(),
        "configuration merged"
    );

    ParsedCommandLine {
        options,
        file_names,
        raw: value.clone(),
        extended_config_paths: resolution.extended,
        errors: resolution.diagnostics,
    }
}
