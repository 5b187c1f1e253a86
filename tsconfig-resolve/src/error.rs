//! Error types for `tsconfig-resolve`.

use thiserror::Error;
use tsconfig_resolver::diagnostic::Diagnostics;

/// Errors surfaced by the `tsconfig-resolve` command.
#[derive(Debug, Error)]
pub enum ResolveCliError {
    /// The library reported one or more diagnostics.
    #[error("{0}")]
    Diagnostics(#[from] Diagnostics),

    /// Output could not be serialised.
    #[error("failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// The log subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
