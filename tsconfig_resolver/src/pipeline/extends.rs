//! Inheritance (`extends`) loading and layering.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value};

use super::options::convert_compiler_options;
use super::{ConfigLayer, PathSpecs, Resolution, root_must_be_object, type_mismatch};
use crate::diagnostic::{Diagnostic, codes};
use crate::host::FileSystem;
use crate::parser::parse_config_text;
use crate::path::{dirname, is_absolute, join, normalize_path, resolve};
use crate::search::search_up;

/// Build the layer for `document`, read from `path`, on top of its bases.
///
/// Bases listed in `extends` are applied in order, so a later base wins over
/// an earlier one and the document itself wins over all of them.
pub(super) fn build_layer(
    document: &Map<String, Value>,
    path: &Utf8Path,
    resolution: &mut Resolution<'_>,
) -> ConfigLayer {
    let directory = dirname(path.as_str());
    let mut layer = ConfigLayer::default();
    for specifier in extends_specifiers(document, path, resolution) {
        if let Some(base) = load_base(&specifier, path, &directory, resolution) {
            layer.overlay(base);
        }
    }
    layer.overlay(own_layer(document, path, &directory, resolution));
    layer
}

fn extends_specifiers(
    document: &Map<String, Value>,
    path: &Utf8Path,
    resolution: &mut Resolution<'_>,
) -> Vec<String> {
    match document.get("extends") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(specifier)) => vec![specifier.clone()],
        Some(Value::Array(items)) => {
            let mut specifiers = Vec::with_capacity(items.len());
            for item in items {
                match item.as_str() {
                    Some(specifier) => specifiers.push(specifier.to_owned()),
                    None => resolution.report(type_mismatch("extends", "string"), path),
                }
            }
            specifiers
        }
        Some(_) => {
            resolution.report(type_mismatch("extends", "string or Array"), path);
            Vec::new()
        }
    }
}

/// Load one base configuration, reporting problems against `from`.
fn load_base(
    specifier: &str,
    from: &Utf8Path,
    directory: &Utf8Path,
    resolution: &mut Resolution<'_>,
) -> Option<ConfigLayer> {
    let Some(target) = locate(specifier, directory, resolution.host) else {
        resolution.report(
            Diagnostic::new(format!("File '{specifier}' not found."))
                .with_code(codes::FILE_NOT_FOUND),
            from,
        );
        return None;
    };
    if resolution.stack.contains(&target) {
        let mut chain: Vec<&str> = resolution.stack.iter().map(|path| path.as_str()).collect();
        chain.push(target.as_str());
        let diagnostic = Diagnostic::new(format!(
            "Circularity detected while resolving configuration: {}",
            chain.join(" -> ")
        ))
        .with_code(codes::CIRCULAR_EXTENDS);
        resolution.report(diagnostic, from);
        return None;
    }

    let text = match resolution.host.read_file(&target) {
        Some(text) if !text.is_empty() => text,
        _ => {
            resolution.report(
                Diagnostic::new(format!("Cannot read file '{target}'."))
                    .with_code(codes::CANNOT_READ_FILE),
                &target,
            );
            return None;
        }
    };
    let parsed = parse_config_text(&target, &text);
    if let Some(error) = parsed.error {
        resolution.diagnostics.push(error);
        return None;
    }
    let Value::Object(document) = parsed.value else {
        resolution.report(root_must_be_object(&target), &target);
        return None;
    };

    tracing::debug!(base = %target, from = %from, "loading extended configuration");
    if !resolution.extended.contains(&target) {
        resolution.extended.push(target.clone());
    }
    resolution.stack.push(target.clone());
    let layer = build_layer(&document, &target, resolution);
    resolution.stack.pop();
    Some(layer)
}

/// Find the file an `extends` specifier refers to.
///
/// Rooted and `.`-relative specifiers are resolved against `directory`, with
/// `.json` appended when the literal path does not exist. Anything else is a
/// package reference looked up in the `node_modules` directories above
/// `directory`.
fn locate(specifier: &str, directory: &Utf8Path, host: &dyn FileSystem) -> Option<Utf8PathBuf> {
    let normalized = normalize_path(specifier);
    let relative = normalized == "."
        || normalized == ".."
        || normalized.starts_with("./")
        || normalized.starts_with("../");
    if is_absolute(&normalized) || relative {
        let candidate = resolve(directory, &normalized);
        return first_file(host, with_json_fallback(candidate));
    }
    search_up(directory, None, |current| {
        let package = join(&join(current, "node_modules"), &normalized);
        first_file(host, with_json_fallback(package.clone()))
            .or_else(|| package_manifest_config(&package, host))
            .or_else(|| first_file(host, [join(&package, "tsconfig.json")]))
    })
}

fn with_json_fallback(candidate: Utf8PathBuf) -> Vec<Utf8PathBuf> {
    if candidate.as_str().ends_with(".json") {
        vec![candidate]
    } else {
        let with_extension = Utf8PathBuf::from(format!("{candidate}.json"));
        vec![candidate, with_extension]
    }
}

fn first_file(
    host: &dyn FileSystem,
    candidates: impl IntoIterator<Item = Utf8PathBuf>,
) -> Option<Utf8PathBuf> {
    candidates.into_iter().find(|candidate| host.file_exists(candidate))
}

/// Honour a `tsconfig` field in the package's `package.json`.
fn package_manifest_config(package: &Utf8Path, host: &dyn FileSystem) -> Option<Utf8PathBuf> {
    let contents = host.read_file(&join(package, "package.json"))?;
    let manifest: Value = serde_json::from_str(&contents).ok()?;
    let entry = manifest.get("tsconfig")?.as_str()?;
    first_file(host, [resolve(package, entry)])
}

/// The contribution of `document` itself, without its bases.
fn own_layer(
    document: &Map<String, Value>,
    path: &Utf8Path,
    directory: &Utf8Path,
    resolution: &mut Resolution<'_>,
) -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    match document.get("compilerOptions") {
        None | Some(Value::Null) => {}
        Some(Value::Object(options)) => {
            let (converted, problems) = convert_compiler_options(options, directory);
            resolution.report_all(problems, path);
            layer.compiler_options = converted;
        }
        Some(_) => resolution.report(type_mismatch("compilerOptions", "object"), path),
    }
    layer.files = path_specs(document, "files", path, directory, resolution);
    layer.include = path_specs(document, "include", path, directory, resolution);
    layer.exclude = path_specs(document, "exclude", path, directory, resolution);
    layer
}

fn path_specs(
    document: &Map<String, Value>,
    key: &str,
    path: &Utf8Path,
    directory: &Utf8Path,
    resolution: &mut Resolution<'_>,
) -> Option<PathSpecs> {
    match document.get(key)? {
        Value::Null => None,
        Value::Array(items) => {
            let mut specs = Vec::with_capacity(items.len());
            for item in items {
                match item.as_str() {
                    Some(spec) => specs.push(spec.to_owned()),
                    None => resolution.report(type_mismatch(key, "string"), path),
                }
            }
            Some(PathSpecs {
                specs,
                base: directory.to_path_buf(),
            })
        }
        _ => {
            resolution.report(type_mismatch(key, "Array"), path);
            None
        }
    }
}
