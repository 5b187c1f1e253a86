//! Known compiler options and conversion of their JSON values.

use camino::Utf8Path;
use serde_json::{Map, Value};

use super::type_mismatch;
use crate::diagnostic::{Diagnostic, codes};
use crate::path::resolve;

#[derive(Debug, Clone, Copy)]
enum OptionKind {
    Boolean,
    String,
    Number,
    /// A string resolved against the declaring file's directory.
    Path,
    StringList,
    PathList,
    /// A case-insensitive string restricted to the listed spellings.
    Enum(&'static [&'static str]),
    Object,
}

impl OptionKind {
    const fn type_name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::String | Self::Path | Self::Enum(_) => "string",
            Self::Number => "number",
            Self::StringList | Self::PathList => "Array",
            Self::Object => "object",
        }
    }
}

const TARGETS: &[&str] = &[
    "es3", "es5", "es6", "es2015", "es2016", "es2017", "es2018", "es2019", "es2020", "es2021",
    "es2022", "es2023", "es2024", "esnext",
];
const MODULES: &[&str] = &[
    "none", "commonjs", "amd", "system", "umd", "es6", "es2015", "es2020", "es2022", "esnext",
    "node16", "node18", "nodenext", "preserve",
];
const MODULE_RESOLUTIONS: &[&str] = &["classic", "node", "node10", "node16", "nodenext", "bundler"];
const MODULE_DETECTIONS: &[&str] = &["auto", "legacy", "force"];
const JSX_MODES: &[&str] = &["preserve", "react", "react-native", "react-jsx", "react-jsxdev"];
const NEW_LINES: &[&str] = &["crlf", "lf"];
const IMPORTS_NOT_USED: &[&str] = &["remove", "preserve", "error"];

/// Options understood in `compilerOptions`, with their value kinds.
const KNOWN_OPTIONS: &[(&str, OptionKind)] = &[
    ("allowArbitraryExtensions", OptionKind::Boolean),
    ("allowImportingTsExtensions", OptionKind::Boolean),
    ("allowJs", OptionKind::Boolean),
    ("allowSyntheticDefaultImports", OptionKind::Boolean),
    ("allowUmdGlobalAccess", OptionKind::Boolean),
    ("allowUnreachableCode", OptionKind::Boolean),
    ("allowUnusedLabels", OptionKind::Boolean),
    ("alwaysStrict", OptionKind::Boolean),
    ("baseUrl", OptionKind::Path),
    ("charset", OptionKind::String),
    ("checkJs", OptionKind::Boolean),
    ("composite", OptionKind::Boolean),
    ("customConditions", OptionKind::StringList),
    ("declaration", OptionKind::Boolean),
    ("declarationDir", OptionKind::Path),
    ("declarationMap", OptionKind::Boolean),
    ("downlevelIteration", OptionKind::Boolean),
    ("emitBOM", OptionKind::Boolean),
    ("emitDeclarationOnly", OptionKind::Boolean),
    ("emitDecoratorMetadata", OptionKind::Boolean),
    ("esModuleInterop", OptionKind::Boolean),
    ("exactOptionalPropertyTypes", OptionKind::Boolean),
    ("experimentalDecorators", OptionKind::Boolean),
    ("forceConsistentCasingInFileNames", OptionKind::Boolean),
    ("importHelpers", OptionKind::Boolean),
    ("importsNotUsedAsValues", OptionKind::Enum(IMPORTS_NOT_USED)),
    ("incremental", OptionKind::Boolean),
    ("inlineSourceMap", OptionKind::Boolean),
    ("inlineSources", OptionKind::Boolean),
    ("isolatedDeclarations", OptionKind::Boolean),
    ("isolatedModules", OptionKind::Boolean),
    ("jsx", OptionKind::Enum(JSX_MODES)),
    ("jsxFactory", OptionKind::String),
    ("jsxFragmentFactory", OptionKind::String),
    ("jsxImportSource", OptionKind::String),
    ("lib", OptionKind::StringList),
    ("mapRoot", OptionKind::Path),
    ("maxNodeModuleJsDepth", OptionKind::Number),
    ("module", OptionKind::Enum(MODULES)),
    ("moduleDetection", OptionKind::Enum(MODULE_DETECTIONS)),
    ("moduleResolution", OptionKind::Enum(MODULE_RESOLUTIONS)),
    ("moduleSuffixes", OptionKind::StringList),
    ("newLine", OptionKind::Enum(NEW_LINES)),
    ("noEmit", OptionKind::Boolean),
    ("noEmitHelpers", OptionKind::Boolean),
    ("noEmitOnError", OptionKind::Boolean),
    ("noErrorTruncation", OptionKind::Boolean),
    ("noFallthroughCasesInSwitch", OptionKind::Boolean),
    ("noImplicitAny", OptionKind::Boolean),
    ("noImplicitOverride", OptionKind::Boolean),
    ("noImplicitReturns", OptionKind::Boolean),
    ("noImplicitThis", OptionKind::Boolean),
    ("noLib", OptionKind::Boolean),
    ("noPropertyAccessFromIndexSignature", OptionKind::Boolean),
    ("noResolve", OptionKind::Boolean),
    ("noUncheckedIndexedAccess", OptionKind::Boolean),
    ("noUnusedLocals", OptionKind::Boolean),
    ("noUnusedParameters", OptionKind::Boolean),
    ("outDir", OptionKind::Path),
    ("outFile", OptionKind::Path),
    ("paths", OptionKind::Object),
    ("plugins", OptionKind::StringList),
    ("preserveConstEnums", OptionKind::Boolean),
    ("preserveSymlinks", OptionKind::Boolean),
    ("removeComments", OptionKind::Boolean),
    ("resolveJsonModule", OptionKind::Boolean),
    ("resolvePackageJsonExports", OptionKind::Boolean),
    ("resolvePackageJsonImports", OptionKind::Boolean),
    ("rootDir", OptionKind::Path),
    ("rootDirs", OptionKind::PathList),
    ("skipDefaultLibCheck", OptionKind::Boolean),
    ("skipLibCheck", OptionKind::Boolean),
    ("sourceMap", OptionKind::Boolean),
    ("sourceRoot", OptionKind::String),
    ("strict", OptionKind::Boolean),
    ("strictBindCallApply", OptionKind::Boolean),
    ("strictBuiltinIteratorReturn", OptionKind::Boolean),
    ("strictFunctionTypes", OptionKind::Boolean),
    ("strictNullChecks", OptionKind::Boolean),
    ("strictPropertyInitialization", OptionKind::Boolean),
    ("stripInternal", OptionKind::Boolean),
    ("target", OptionKind::Enum(TARGETS)),
    ("tsBuildInfoFile", OptionKind::Path),
    ("typeRoots", OptionKind::PathList),
    ("types", OptionKind::StringList),
    ("useDefineForClassFields", OptionKind::Boolean),
    ("useUnknownInCatchVariables", OptionKind::Boolean),
    ("verbatimModuleSyntax", OptionKind::Boolean),
];

fn lookup(name: &str) -> Option<OptionKind> {
    KNOWN_OPTIONS
        .iter()
        .find_map(|&(known, kind)| (known == name).then_some(kind))
}

/// Validate `options`, resolving path values against `directory`.
///
/// Valid entries are returned converted; invalid ones are left out and
/// described by the returned diagnostics, which carry no file. An explicit
/// `null` is kept so that it can clear an inherited value.
pub(super) fn convert_compiler_options(
    options: &Map<String, Value>,
    directory: &Utf8Path,
) -> (Map<String, Value>, Vec<Diagnostic>) {
    let mut converted = Map::new();
    let mut problems = Vec::new();
    for (name, value) in options {
        let Some(kind) = lookup(name) else {
            problems.push(
                Diagnostic::new(format!("Unknown compiler option '{name}'."))
                    .with_code(codes::UNKNOWN_COMPILER_OPTION),
            );
            continue;
        };
        if value.is_null() {
            converted.insert(name.clone(), Value::Null);
            continue;
        }
        match convert_value(name, kind, value, directory) {
            Ok(accepted) => {
                converted.insert(name.clone(), accepted);
            }
            Err(problem) => problems.push(problem),
        }
    }
    (converted, problems)
}

fn convert_value(
    name: &str,
    kind: OptionKind,
    value: &Value,
    directory: &Utf8Path,
) -> Result<Value, Diagnostic> {
    let mismatch = || type_mismatch(name, kind.type_name());
    match kind {
        OptionKind::Boolean if value.is_boolean() => Ok(value.clone()),
        OptionKind::Number if value.is_number() => Ok(value.clone()),
        OptionKind::Object if value.is_object() => Ok(value.clone()),
        OptionKind::String => value.as_str().map(Value::from).ok_or_else(mismatch),
        OptionKind::Path => value
            .as_str()
            .map(|path| Value::from(resolve(directory, path).into_string()))
            .ok_or_else(mismatch),
        OptionKind::StringList => string_list(value)
            .map(|items| Value::from(items.into_iter().map(Value::from).collect::<Vec<_>>()))
            .ok_or_else(mismatch),
        OptionKind::PathList => string_list(value)
            .map(|items| {
                Value::from(
                    items
                        .into_iter()
                        .map(|path| Value::from(resolve(directory, path).into_string()))
                        .collect::<Vec<_>>(),
                )
            })
            .ok_or_else(mismatch),
        OptionKind::Enum(allowed) => {
            let text = value.as_str().ok_or_else(mismatch)?;
            let lowered = text.to_ascii_lowercase();
            if allowed.contains(&lowered.as_str()) {
                Ok(Value::from(lowered))
            } else {
                Err(Diagnostic::new(format!(
                    "Argument for '{name}' option must be: {}.",
                    allowed
                        .iter()
                        .map(|spelling| format!("'{spelling}'"))
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
                .with_code(codes::INVALID_OPTION_ARGUMENT))
            }
        }
        OptionKind::Boolean | OptionKind::Number | OptionKind::Object => Err(mismatch()),
    }
}

fn string_list(value: &Value) -> Option<Vec<&str>> {
    value.as_array()?.iter().map(Value::as_str).collect()
}
