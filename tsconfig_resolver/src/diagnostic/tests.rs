//! Tests for diagnostic construction and rendering.

use super::*;
use crate::host::MemoryFileSystem;
use anyhow::{Context, Result, ensure};
use camino::Utf8Path;
use rstest::rstest;

#[test]
fn defaults_to_uncoded_error() {
    let diagnostic = Diagnostic::new("life");
    assert_eq!(diagnostic.message_text(), "life");
    assert_eq!(diagnostic.category(), DiagnosticCategory::Error);
    assert!(diagnostic.code().is_none());
    assert_eq!(diagnostic.code(), DiagnosticCode::NONE);
    assert!(diagnostic.file().is_none());
    assert_eq!(diagnostic.start(), None);
    assert_eq!(diagnostic.length(), None);
}

#[test]
fn builders_override_code_and_category() {
    let diagnostic = Diagnostic::new("life")
        .with_code(42)
        .with_category(DiagnosticCategory::Warning);
    assert_eq!(diagnostic.code().value(), Some(42));
    assert_eq!(diagnostic.category(), DiagnosticCategory::Warning);
}

#[rstest]
#[case(0)]
#[case(-100)]
#[case(5083)]
#[case(i32::MAX)]
fn real_codes_never_collide_with_sentinel(#[case] raw: i32) {
    let code = DiagnosticCode::new(raw);
    assert!(!code.is_none());
    assert_eq!(code.value(), Some(raw));
}

#[test]
fn file_path_attribution_loads_contents() -> Result<()> {
    let host = MemoryFileSystem::new("/work").with_file("/work/tsconfig.json", "{}");
    let diagnostic = Diagnostic::new("life").with_file_path(Utf8Path::new("/work/tsconfig.json"), &host);
    let file = diagnostic.file().context("diagnostic should carry a file")?;
    ensure!(file.file_name().as_str() == "/work/tsconfig.json", "unexpected file {}", file.file_name());
    ensure!(file.text() == "{}", "unexpected text {:?}", file.text());
    Ok(())
}

#[test]
fn unreadable_file_still_yields_placeholder() -> Result<()> {
    let host = MemoryFileSystem::new("/work");
    let diagnostic = Diagnostic::new("life").with_file_path(Utf8Path::new("not-exists.json"), &host);
    let file = diagnostic.file().context("placeholder file expected")?;
    ensure!(file.file_name().as_str() == "not-exists.json", "unexpected file {}", file.file_name());
    ensure!(file.text().is_empty(), "placeholder text must be empty");
    ensure!(diagnostic.message_text() == "life", "message must survive");
    Ok(())
}

#[rstest]
#[case(Diagnostic::new("plain"), "error: plain")]
#[case(Diagnostic::new("coded").with_code(5081), "error TS5081: coded")]
#[case(
    Diagnostic::new("soft").with_code(6148).with_category(DiagnosticCategory::Warning),
    "warning TS6148: soft"
)]
#[case(
    Diagnostic::new("attributed").with_code(5083).with_file(SourceFile::new("/p/tsconfig.json", "")),
    "/p/tsconfig.json: error TS5083: attributed"
)]
fn display_renders_heading(#[case] diagnostic: Diagnostic, #[case] expected: &str) {
    assert_eq!(diagnostic.to_string(), expected);
}

#[test]
fn collection_preserves_order() -> Result<()> {
    let diagnostics = Diagnostics::from_vec(vec![
        Diagnostic::new("first").with_code(1),
        Diagnostic::new("second").with_code(2),
    ])
    .context("non-empty diagnostics")?;
    let codes: Vec<_> = diagnostics.iter().filter_map(|d| d.code().value()).collect();
    ensure!(codes == [1, 2], "unexpected order {codes:?}");
    ensure!(
        diagnostics.to_string() == "error TS1: first\nerror TS2: second",
        "unexpected rendering {diagnostics}"
    );
    Ok(())
}

#[test]
fn empty_collection_is_rejected() {
    assert!(Diagnostics::from_vec(Vec::new()).is_none());
}
