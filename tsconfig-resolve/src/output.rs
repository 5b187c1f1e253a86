//! Output writers for `tsconfig-resolve`.
//!
//! Results go to the supplied writer (stdout in the binary); diagnostics go
//! to the error writer in the selected format.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use serde_json::Value;
use tsconfig_resolver::ResolvedConfig;
use tsconfig_resolver::diagnostic::{Diagnostic, DiagnosticCategory, Diagnostics};

use crate::cli::OutputFormat;
use crate::error::ResolveCliError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FoundView<'a> {
    config_file_path: &'a Utf8Path,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedView<'a> {
    config_file_path: &'a Utf8Path,
    compiler_options: &'a tsconfig_resolver::pipeline::CompilerOptions,
    file_names: &'a [Utf8PathBuf],
    extended_config_paths: &'a [Utf8PathBuf],
}

#[derive(Serialize)]
struct DiagnosticView<'a> {
    category: DiagnosticCategory,
    code: Option<i32>,
    file: Option<&'a Utf8Path>,
    start: Option<usize>,
    length: Option<usize>,
    message: &'a str,
}

impl<'a> From<&'a Diagnostic> for DiagnosticView<'a> {
    fn from(diagnostic: &'a Diagnostic) -> Self {
        Self {
            category: diagnostic.category(),
            code: diagnostic.code().value(),
            file: diagnostic.file().map(|source| source.file_name()),
            start: diagnostic.start(),
            length: diagnostic.length(),
            message: diagnostic.message_text(),
        }
    }
}

/// Writes the path found by a search.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn write_found(
    out: &mut impl Write,
    format: OutputFormat,
    path: &Utf8Path,
) -> Result<(), ResolveCliError> {
    match format {
        OutputFormat::Text => writeln!(out, "{path}")?,
        OutputFormat::Json => write_json(out, &FoundView { config_file_path: path })?,
    }
    Ok(())
}

/// Writes a resolved configuration.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn write_resolved(
    out: &mut impl Write,
    format: OutputFormat,
    config: &ResolvedConfig,
) -> Result<(), ResolveCliError> {
    match format {
        OutputFormat::Text => write_resolved_text(out, config)?,
        OutputFormat::Json => write_json(
            out,
            &ResolvedView {
                config_file_path: &config.config_file_path,
                compiler_options: &config.options,
                file_names: &config.file_names,
                extended_config_paths: &config.extended_config_paths,
            },
        )?,
    }
    Ok(())
}

/// Writes diagnostics, one per line in text mode.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn write_diagnostics(
    err: &mut impl Write,
    format: OutputFormat,
    diagnostics: &Diagnostics,
) -> Result<(), ResolveCliError> {
    match format {
        OutputFormat::Text => writeln!(err, "{diagnostics}")?,
        OutputFormat::Json => {
            let views: Vec<DiagnosticView<'_>> =
                diagnostics.iter().map(DiagnosticView::from).collect();
            write_json(err, &views)?;
        }
    }
    Ok(())
}

fn write_resolved_text(out: &mut impl Write, config: &ResolvedConfig) -> std::io::Result<()> {
    writeln!(out, "config: {}", config.config_file_path)?;
    for extended in &config.extended_config_paths {
        writeln!(out, "extends: {extended}")?;
    }
    writeln!(out, "compilerOptions:")?;
    for (name, value) in config.options.iter() {
        writeln!(out, "  {name}: {}", render_value(value))?;
    }
    writeln!(out, "files:")?;
    for file in &config.file_names {
        writeln!(out, "  {file}")?;
    }
    Ok(())
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<(), ResolveCliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use rstest::rstest;
    use serde_json::json;
    use tsconfig_resolver::diagnostic::codes;

    fn utf8(bytes: Vec<u8>) -> String {
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[rstest]
    fn found_path_is_a_single_line() -> Result<(), ResolveCliError> {
        let mut out = Vec::new();
        write_found(&mut out, OutputFormat::Text, Utf8Path::new("/work/tsconfig.json"))?;
        assert_eq!(utf8(out), "/work/tsconfig.json\n");
        Ok(())
    }

    #[rstest]
    fn found_path_json_uses_camel_case() -> Result<(), ResolveCliError> {
        let mut out = Vec::new();
        write_found(&mut out, OutputFormat::Json, Utf8Path::new("/work/tsconfig.json"))?;
        let parsed: Value = serde_json::from_slice(&out)?;
        assert_eq!(parsed, json!({ "configFilePath": "/work/tsconfig.json" }));
        Ok(())
    }

    #[rstest]
    fn diagnostics_json_carries_codes() -> anyhow::Result<()> {
        let diagnostics = Diagnostics::from_vec(vec![
            Diagnostic::new("Cannot read file '/work/tsconfig.json'.")
                .with_code(codes::CANNOT_READ_FILE),
            Diagnostic::new("uncoded"),
        ])
        .context("diagnostics")?;
        let mut err = Vec::new();
        write_diagnostics(&mut err, OutputFormat::Json, &diagnostics)?;
        let parsed: Value = serde_json::from_slice(&err)?;
        assert_eq!(parsed[0]["code"], json!(5083));
        assert_eq!(parsed[0]["category"], json!("error"));
        assert_eq!(parsed[1]["code"], Value::Null);
        Ok(())
    }

    #[rstest]
    #[case(json!("es2020"), "es2020")]
    #[case(json!(true), "true")]
    #[case(json!(["dom", "es2020"]), r#"["dom","es2020"]"#)]
    fn values_render_without_string_quotes(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(render_value(&value), expected);
    }
}
