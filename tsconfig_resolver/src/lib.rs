//! Locate and resolve `tsconfig.json` files.
//!
//! [`find_config_file`] walks upwards from a start directory until it finds
//! the requested configuration file. [`resolve_config`] goes further: it
//! reads and parses the file, follows its `extends` chain, validates the
//! compiler options and expands the input file list.
//!
//! Nothing here panics or returns an opaque error. Every failure is a
//! [`Diagnostic`](diagnostic::Diagnostic) with a stable numeric code, grouped
//! into [`Diagnostics`](diagnostic::Diagnostics).
//!
//! All operations come in two flavours: the plain one uses the real file
//! system and the `_with` variant takes any [`host::FileSystem`].
//!
//! ```no_run
//! use tsconfig_resolver::{ResolveOptions, resolve_config};
//!
//! match resolve_config(&ResolveOptions::new().with_start_directory("packages/app")) {
//!     Ok(config) => println!("{} input files", config.file_names.len()),
//!     Err(diagnostics) => eprintln!("{diagnostics}"),
//! }
//! ```

pub mod diagnostic;
pub mod host;
mod parser;
pub mod path;
pub mod pipeline;
mod resolver;
mod search;

pub use parser::{ParsedConfigText, parse_config_text};
pub use path::normalize_path;
pub use resolver::{
    DEFAULT_CONFIG_FILE_NAME, NormalizedSearch, ResolveOptions, ResolvedConfig, SearchOptions,
    find_config_file, find_config_file_with, normalize_options, resolve_config,
    resolve_config_with,
};
pub use search::search_up;
