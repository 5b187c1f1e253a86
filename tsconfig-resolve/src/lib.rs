//! Library interface for the `tsconfig-resolve` command.
//!
//! The binary is a thin wrapper around [`run`], which keeps argument
//! handling and output testable without spawning a process.

pub mod cli;
pub mod error;
pub mod output;

use std::io::Write;

use tracing::debug;
use tsconfig_resolver::{find_config_file, resolve_config};

use crate::cli::Args;
use crate::error::ResolveCliError;

/// Run the command described by `args`.
///
/// Results are written to `out`. When the library reports diagnostics they
/// are written to `err` and returned as [`ResolveCliError::Diagnostics`].
///
/// # Errors
///
/// Returns an error when resolution fails or output cannot be written.
pub fn run(args: &Args, out: &mut impl Write, err: &mut impl Write) -> Result<(), ResolveCliError> {
    let options = args.resolve_options();
    debug!(project = %args.project, format = args.format.as_str(), "running");
    let outcome = if args.is_find_only {
        find_config_file(options.search())
            .map_err(ResolveCliError::from)
            .and_then(|path| output::write_found(out, args.format, &path))
    } else {
        resolve_config(&options)
            .map_err(ResolveCliError::from)
            .and_then(|config| output::write_resolved(out, args.format, &config))
    };
    if let Err(ResolveCliError::Diagnostics(diagnostics)) = &outcome {
        output::write_diagnostics(err, args.format, diagnostics)?;
    }
    outcome
}
