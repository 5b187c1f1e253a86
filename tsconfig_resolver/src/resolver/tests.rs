//! Tests for option normalisation, search and resolution.

use super::*;
use crate::diagnostic::DiagnosticCode;
use crate::host::MemoryFileSystem;
use anyhow::{Context, Result, anyhow, ensure};
use camino::Utf8Path;
use rstest::{fixture, rstest};
use serde_json::json;

/// A repository whose current directory is `/work`.
#[fixture]
fn repo() -> MemoryFileSystem {
    MemoryFileSystem::new("/work")
        .with_file("/work/tsconfig.json", r#"{ "compilerOptions": { "strict": true } }"#)
        .with_file("/work/src/index.ts", "")
        .with_directory("/work/package/client")
}

fn single(result: DiagnosticResult<impl std::fmt::Debug>) -> Result<Diagnostic> {
    let diagnostics = match result {
        Ok(value) => return Err(anyhow!("expected diagnostics, got {value:?}")),
        Err(diagnostics) => diagnostics,
    };
    ensure!(diagnostics.len() == 1, "expected one diagnostic: {diagnostics}");
    diagnostics.into_vec().into_iter().next().context("diagnostic missing")
}

fn found(host: &MemoryFileSystem, options: &SearchOptions) -> Option<String> {
    find_config_file_with(options, host).ok().map(Utf8PathBuf::into_string)
}

#[rstest]
#[case(SearchOptions::default())]
#[case(SearchOptions::new("tsconfig.json"))]
#[case(SearchOptions::new("package/tsconfig.json"))]
#[case(SearchOptions::new("./package/tsconfig.json"))]
#[case(SearchOptions::new(r".\package\tsconfig.json"))]
#[case(SearchOptions::new("tsconfig.json").with_start_directory("package"))]
#[case(SearchOptions::new("./tsconfig.json").with_start_directory("./package"))]
#[case(SearchOptions::new("/work/tsconfig.json"))]
#[case(SearchOptions::new("/work/tsconfig.json").with_start_directory("."))]
#[case(SearchOptions::new("/work/tsconfig.json").with_start_directory("/work/"))]
#[case(SearchOptions::new("tsconfig.json").with_start_directory(""))]
#[case(SearchOptions::new("tsconfig.json").with_stop_directory(".."))]
#[case(SearchOptions::new("deep/path/that/does/not/exist/tsconfig.json"))]
fn finds_the_repository_config(repo: MemoryFileSystem, #[case] options: SearchOptions) {
    assert_eq!(found(&repo, &options).as_deref(), Some("/work/tsconfig.json"));
}

#[rstest]
fn stop_directory_bounds_the_walk(repo: MemoryFileSystem) -> Result<()> {
    let options = SearchOptions::new("tsconfig.json")
        .with_start_directory("./package/client")
        .with_stop_directory("./package");
    let diagnostic = single(find_config_file_with(&options, &repo))?;
    ensure!(diagnostic.code() == codes::CANNOT_FIND_CONFIG_FILE, "code {:?}", diagnostic.code());
    ensure!(
        diagnostic.message_text()
            == "Cannot find a 'tsconfig.json' file at the current directory: '/work/package/client'.",
        "message {}",
        diagnostic.message_text()
    );
    Ok(())
}

#[rstest]
fn hit_in_stop_directory_wins(repo: MemoryFileSystem) {
    let options = SearchOptions::new("tsconfig.json")
        .with_start_directory("package/client")
        .with_stop_directory("/work");
    assert_eq!(found(&repo, &options).as_deref(), Some("/work/tsconfig.json"));
}

#[rstest]
fn not_found_names_the_start_directory(repo: MemoryFileSystem) -> Result<()> {
    let options = SearchOptions::new("deep/path/that/does/not-exist.json");
    let diagnostic = single(find_config_file_with(&options, &repo))?;
    ensure!(
        diagnostic.message_text()
            == "Cannot find a 'not-exist.json' file at the current directory: '/work/deep/path/that/does'.",
        "message {}",
        diagnostic.message_text()
    );
    ensure!(diagnostic.file().is_none(), "not-found diagnostics carry no file");
    Ok(())
}

#[rstest]
fn absolute_path_must_agree_with_start_directory(repo: MemoryFileSystem) -> Result<()> {
    let options = SearchOptions::new("/work/tsconfig.json").with_start_directory("./package");
    let diagnostic = single(find_config_file_with(&options, &repo))?;
    ensure!(diagnostic.code() == codes::OPTIONS_MISMATCH, "code {:?}", diagnostic.code());
    ensure!(
        diagnostic.message_text()
            == "Do not specify the 'start_directory' option if you give an absolute 'file_path' or they must be equal. Expected '/work', received '/work/package'.",
        "message {}",
        diagnostic.message_text()
    );
    Ok(())
}

#[rstest]
fn mismatch_wins_over_missing_start_directory(repo: MemoryFileSystem) -> Result<()> {
    let options = SearchOptions::new("/work/tsconfig.json")
        .with_start_directory("/nowhere")
        .require_start_directory(true);
    let diagnostic = single(normalize_options(&options, &repo))?;
    ensure!(diagnostic.code() == codes::OPTIONS_MISMATCH, "code {:?}", diagnostic.code());
    Ok(())
}

#[rstest]
fn required_start_directory_must_exist(repo: MemoryFileSystem) -> Result<()> {
    let options = SearchOptions::new("deep/path/that/does/not/exist/tsconfig.json")
        .require_start_directory(true);
    let diagnostic = single(find_config_file_with(&options, &repo))?;
    ensure!(
        diagnostic.code() == codes::DIRECTORY_DOES_NOT_EXIST,
        "code {:?}",
        diagnostic.code()
    );
    ensure!(
        diagnostic.message_text()
            == "Directory '/work/deep/path/that/does/not/exist' does not exist, skipping all lookups in it.",
        "message {}",
        diagnostic.message_text()
    );
    Ok(())
}

#[rstest]
fn normalisation_resolves_every_path(repo: MemoryFileSystem) -> Result<()> {
    let options = SearchOptions::new(r"configs\\tsconfig.base.json")
        .with_start_directory("package")
        .with_stop_directory("..")
        .require_start_directory(false);
    let search = normalize_options(&options, &repo).map_err(|d| anyhow!("{d}"))?;
    ensure!(search.file_name() == "tsconfig.base.json", "file {}", search.file_name());
    ensure!(
        search.start_directory().as_str() == "/work/package/configs",
        "start {}",
        search.start_directory()
    );
    ensure!(
        search.stop_directory().map(Utf8Path::as_str) == Some("/"),
        "stop {:?}",
        search.stop_directory()
    );
    ensure!(!search.require_start_directory_exists(), "flag must be carried");
    Ok(())
}

#[rstest]
fn resolves_a_configuration(repo: MemoryFileSystem) -> Result<()> {
    let config = resolve_config_with(&ResolveOptions::new(), &repo).map_err(|d| anyhow!("{d}"))?;
    ensure!(config.config_file_path.as_str() == "/work/tsconfig.json", "path {}", config.config_file_path);
    ensure!(config.options.get_bool("strict") == Some(true), "options {:?}", config.options);
    ensure!(config.file_names == ["/work/src/index.ts"], "files {:?}", config.file_names);
    ensure!(config.errors.is_empty(), "errors must be empty on success");
    ensure!(config.raw == json!({ "compilerOptions": { "strict": true } }), "raw {}", config.raw);
    Ok(())
}

#[rstest]
fn overrides_reach_the_pipeline(repo: MemoryFileSystem) -> Result<()> {
    let options = ResolveOptions::new()
        .with_compiler_option("strict", json!(false))
        .with_compiler_option("outDir", json!("dist"));
    let config = resolve_config_with(&options, &repo).map_err(|d| anyhow!("{d}"))?;
    ensure!(config.options.get_bool("strict") == Some(false), "override must win");
    ensure!(config.options.get_str("outDir") == Some("/work/dist"), "outDir {:?}", config.options.get("outDir"));
    Ok(())
}

#[test]
fn empty_files_cannot_be_read() -> Result<()> {
    let host = MemoryFileSystem::new("/work").with_file("fixtures/tsconfig.empty.json", "");
    let options = ResolveOptions::new().with_file_path("fixtures/tsconfig.empty.json");
    let diagnostic = single(resolve_config_with(&options, &host))?;
    ensure!(diagnostic.code() == codes::CANNOT_READ_FILE, "code {:?}", diagnostic.code());
    ensure!(
        diagnostic.message_text() == "Cannot read file '/work/fixtures/tsconfig.empty.json'.",
        "message {}",
        diagnostic.message_text()
    );
    ensure!(
        diagnostic.file().map(|f| f.file_name().as_str()) == Some("/work/fixtures/tsconfig.empty.json"),
        "diagnostic must name the file"
    );
    Ok(())
}

#[test]
fn syntax_errors_pass_through() -> Result<()> {
    let host = MemoryFileSystem::new("/work").with_file("tsconfig.json", "not json");
    let diagnostic = single(resolve_config_with(&ResolveOptions::new(), &host))?;
    ensure!(diagnostic.message_text() == "'{' expected.", "message {}", diagnostic.message_text());
    ensure!(diagnostic.code() == codes::SYNTAX_ERROR, "code {:?}", diagnostic.code());
    ensure!(diagnostic.start() == Some(0), "span {:?}", diagnostic.start());
    Ok(())
}

#[test]
fn pipeline_diagnostics_are_returned_in_order() -> Result<()> {
    let host = MemoryFileSystem::new("/work")
        .with_file(
            "tsconfig.json",
            r#"{ "compilerOptions": { "strict": "yes", "unknownFlag": true } }"#,
        )
        .with_file("src/a.ts", "");
    let diagnostics = resolve_config_with(&ResolveOptions::new(), &host)
        .err()
        .context("expected diagnostics")?;
    let raised: Vec<DiagnosticCode> = diagnostics.iter().map(Diagnostic::code).collect();
    ensure!(
        raised == [codes::OPTION_TYPE_MISMATCH, codes::UNKNOWN_COMPILER_OPTION],
        "codes {raised:?}"
    );
    let first = diagnostics.first().context("first diagnostic")?;
    ensure!(
        first.message_text() == "Compiler option 'strict' requires a value of type boolean.",
        "message {}",
        first.message_text()
    );
    Ok(())
}

#[test]
fn configuration_without_inputs_is_rejected() -> Result<()> {
    let host = MemoryFileSystem::new("/work")
        .with_file("fixtures/no-source-files/tsconfig.no-files-or-include.json", "{}");
    let options = ResolveOptions::new()
        .with_file_path("fixtures/no-source-files/tsconfig.no-files-or-include.json");
    let diagnostic = single(resolve_config_with(&options, &host))?;
    ensure!(diagnostic.code() == codes::NO_INPUTS_FOUND, "code {:?}", diagnostic.code());
    ensure!(
        diagnostic.message_text()
            == "No inputs were found in config file '/work/fixtures/no-source-files/tsconfig.no-files-or-include.json'. Specified 'include' paths were '[\"**/*\"]' and 'exclude' paths were '[]'.",
        "message {}",
        diagnostic.message_text()
    );
    Ok(())
}

#[test]
fn extended_configuration_narrows_inputs() -> Result<()> {
    let host = MemoryFileSystem::new("/work")
        .with_file("fixtures/tsconfig.json", "{}")
        .with_file(
            "fixtures/tsconfig.extends.json",
            r#"{ "extends": "./tsconfig.json", "files": ["src/module-b.ts"] }"#,
        )
        .with_file("fixtures/src/module-a.ts", "")
        .with_file("fixtures/src/module-b.ts", "");
    let options = ResolveOptions::new().with_file_path("fixtures/tsconfig.extends.json");
    let config = resolve_config_with(&options, &host).map_err(|d| anyhow!("{d}"))?;
    ensure!(config.file_names == ["/work/fixtures/src/module-b.ts"], "files {:?}", config.file_names);
    ensure!(config.raw["extends"] == "./tsconfig.json", "raw {}", config.raw);
    ensure!(
        config.extended_config_paths == ["/work/fixtures/tsconfig.json"],
        "extended {:?}",
        config.extended_config_paths
    );
    Ok(())
}
