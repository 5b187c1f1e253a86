//! Stable diagnostic codes.
//!
//! Codes follow the numbering used by the TypeScript compiler for the same
//! conditions so downstream tooling can branch on familiar values. Negative
//! codes are local to this crate.

use super::DiagnosticCode;

/// `start_directory` disagrees with the directory of an absolute `file_path`.
pub const OPTIONS_MISMATCH: DiagnosticCode = DiagnosticCode::new(-100);
/// Generic syntax error while reading a configuration document.
pub const SYNTAX_ERROR: DiagnosticCode = DiagnosticCode::new(1005);
/// An option is not recognised.
pub const UNKNOWN_COMPILER_OPTION: DiagnosticCode = DiagnosticCode::new(5023);
/// An option has the wrong JSON type.
pub const OPTION_TYPE_MISMATCH: DiagnosticCode = DiagnosticCode::new(5024);
/// No configuration file was found walking up from the start directory.
pub const CANNOT_FIND_CONFIG_FILE: DiagnosticCode = DiagnosticCode::new(5081);
/// The configuration file exists but is empty or unreadable.
pub const CANNOT_READ_FILE: DiagnosticCode = DiagnosticCode::new(5083);
/// The root of a configuration document is not an object.
pub const ROOT_MUST_BE_OBJECT: DiagnosticCode = DiagnosticCode::new(5092);
/// An enum-valued option received an unsupported value.
pub const INVALID_OPTION_ARGUMENT: DiagnosticCode = DiagnosticCode::new(6046);
/// A file referenced through `extends` does not exist.
pub const FILE_NOT_FOUND: DiagnosticCode = DiagnosticCode::new(6053);
/// The required start directory does not exist.
pub const DIRECTORY_DOES_NOT_EXIST: DiagnosticCode = DiagnosticCode::new(6148);
/// The `extends` chain loops back on itself.
pub const CIRCULAR_EXTENDS: DiagnosticCode = DiagnosticCode::new(18000);
/// `files` is present but empty and no `include` is given.
pub const EMPTY_FILES_LIST: DiagnosticCode = DiagnosticCode::new(18002);
/// No input files matched `files`/`include`.
pub const NO_INPUTS_FOUND: DiagnosticCode = DiagnosticCode::new(18003);
