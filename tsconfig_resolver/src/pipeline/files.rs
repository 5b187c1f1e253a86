//! Expansion of `files`, `include` and `exclude` into input file names.

use std::collections::{HashMap, HashSet};

use camino::{Utf8Path, Utf8PathBuf};

use super::wildcard::{ExcludeSet, IncludePattern};
use super::{CompilerOptions, ConfigLayer, Resolution};
use crate::diagnostic::{Diagnostic, codes};
use crate::path::{join, resolve};

const DEFAULT_INCLUDE: &str = "**/*";
const DEFAULT_EXCLUDES: &[&str] = &["node_modules", "bower_components", "jspm_packages"];

/// Package directories wildcards never descend into unless a pattern starts
/// inside one.
const PACKAGE_DIRECTORIES: &[&str] = DEFAULT_EXCLUDES;

/// Extensions whose files share a stem namespace, highest priority first.
const EXTENSION_GROUPS: &[&[&str]] = &[
    &[".ts", ".tsx", ".d.ts", ".js", ".jsx"],
    &[".cts", ".d.cts", ".cjs"],
    &[".mts", ".d.mts", ".mjs"],
];
const SCRIPT_EXTENSIONS: &[&str] = &[".js", ".jsx", ".cjs", ".mjs"];

/// Position of an extension within `EXTENSION_GROUPS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rank {
    group: usize,
    position: usize,
    extension: &'static str,
}

impl Rank {
    /// Whether a file ranked `self` hides a sibling ranked `other`.
    ///
    /// A `.d.ts` never hides a `.js` or `.jsx` of the same stem.
    fn shadows(self, other: Self) -> bool {
        self.group == other.group
            && self.position < other.position
            && !(self.extension == ".d.ts" && matches!(other.extension, ".js" | ".jsx"))
    }
}

/// Classify `name`, returning its rank and its name without extension.
fn classify(name: &str, allow_js: bool) -> Option<(Rank, &str)> {
    EXTENSION_GROUPS
        .iter()
        .enumerate()
        .flat_map(|(group, extensions)| {
            extensions.iter().enumerate().map(move |(position, &extension)| Rank {
                group,
                position,
                extension,
            })
        })
        .filter(|rank| allow_js || !SCRIPT_EXTENSIONS.contains(&rank.extension))
        .filter_map(|rank| {
            name.strip_suffix(rank.extension)
                .filter(|stem| !stem.is_empty())
                .map(|stem| (rank, stem))
        })
        .max_by_key(|(rank, _)| rank.extension.len())
}

#[derive(Debug)]
struct Candidate {
    path: Utf8PathBuf,
    stem: Utf8PathBuf,
    rank: Rank,
}

/// A ranked file sharing a stem with others; `location` is `None` for
/// explicit `files` entries, which are never removed.
struct Sibling {
    rank: Rank,
    location: Option<(usize, usize)>,
}

/// Matches grouped by the `include` entry that claimed them.
struct Matches {
    groups: Vec<Vec<Option<Utf8PathBuf>>>,
    seen: HashSet<Utf8PathBuf>,
    siblings: HashMap<(usize, Utf8PathBuf), Vec<Sibling>>,
}

impl Matches {
    fn new(groups: usize) -> Self {
        Self {
            groups: (0..groups).map(|_| Vec::new()).collect(),
            seen: HashSet::new(),
            siblings: HashMap::new(),
        }
    }

    /// Record an explicit `files` entry so it hides lower-ranked matches.
    fn add_explicit(&mut self, path: &Utf8Path) {
        self.seen.insert(path.to_path_buf());
        let (Some(directory), Some(name)) = (path.parent(), path.file_name()) else {
            return;
        };
        if let Some((rank, stem)) = classify(name, true) {
            self.siblings
                .entry((rank.group, join(directory, stem)))
                .or_default()
                .push(Sibling { rank, location: None });
        }
    }

    /// Add `candidate` to group `index` unless a higher-ranked sibling is
    /// already present, dropping the siblings it outranks.
    fn add(&mut self, index: usize, candidate: Candidate) {
        if !self.seen.insert(candidate.path.clone()) {
            return;
        }
        let rank = candidate.rank;
        let siblings = self.siblings.entry((rank.group, candidate.stem)).or_default();
        if siblings.iter().any(|sibling| sibling.rank.shadows(rank)) {
            return;
        }
        let groups = &mut self.groups;
        siblings.retain(|sibling| {
            let Some((group, slot)) = sibling.location else {
                return true;
            };
            if !rank.shadows(sibling.rank) {
                return true;
            }
            if let Some(entry) = groups.get_mut(group).and_then(|paths| paths.get_mut(slot)) {
                *entry = None;
            }
            false
        });
        if let Some(paths) = groups.get_mut(index) {
            siblings.push(Sibling {
                rank,
                location: Some((index, paths.len())),
            });
            paths.push(Some(candidate.path));
        }
    }

    fn into_paths(self) -> impl Iterator<Item = Utf8PathBuf> {
        self.groups.into_iter().flatten().flatten()
    }
}

struct Walker<'a> {
    includes: &'a [IncludePattern],
    excludes: &'a ExcludeSet,
    allow_js: bool,
    matches: Matches,
    visited: HashSet<Utf8PathBuf>,
}

impl Walker<'_> {
    fn walk(&mut self, resolution: &Resolution<'_>, directory: &Utf8Path, descend_packages: bool) {
        if !self.visited.insert(directory.to_path_buf()) {
            return;
        }
        let entries = resolution.host.read_directory(directory);
        for name in &entries.files {
            let path = join(directory, name);
            let Some((rank, stem)) = classify(name, self.allow_js) else {
                continue;
            };
            if self.excludes.excludes(&path) {
                continue;
            }
            if let Some(index) = self.includes.iter().position(|include| include.matches(&path)) {
                self.matches.add(
                    index,
                    Candidate {
                        stem: join(directory, stem),
                        path,
                        rank,
                    },
                );
            }
        }
        for name in &entries.directories {
            if !descend_packages && PACKAGE_DIRECTORIES.contains(&name.as_str()) {
                continue;
            }
            let path = join(directory, name);
            if !self.excludes.excludes(&path) {
                self.walk(resolution, &path, descend_packages);
            }
        }
    }
}

fn specs_json(specs: &[String]) -> String {
    serde_json::to_string(specs).unwrap_or_else(|_| String::from("[]"))
}

/// Compute the input files of the merged `layer`.
pub(super) fn expand(
    layer: &ConfigLayer,
    options: &CompilerOptions,
    base_directory: &Utf8Path,
    config_file_path: &Utf8Path,
    resolution: &mut Resolution<'_>,
) -> Vec<Utf8PathBuf> {
    let explicit: Vec<Utf8PathBuf> = layer
        .files
        .iter()
        .flat_map(|files| files.specs.iter().map(|spec| resolve(&files.base, spec)))
        .collect();

    if layer.files.as_ref().is_some_and(|files| files.specs.is_empty()) && layer.include.is_none() {
        resolution.report(
            Diagnostic::new(format!(
                "The 'files' list in config file '{config_file_path}' is empty."
            ))
            .with_code(codes::EMPTY_FILES_LIST),
            config_file_path,
        );
        return Vec::new();
    }

    let (include_specs, include_base) = match (&layer.include, &layer.files) {
        (Some(include), _) => (include.specs.clone(), include.base.clone()),
        (None, None) => (vec![DEFAULT_INCLUDE.to_owned()], base_directory.to_path_buf()),
        (None, Some(_)) => (Vec::new(), base_directory.to_path_buf()),
    };
    let includes: Vec<IncludePattern> = include_specs
        .iter()
        .filter_map(|spec| IncludePattern::new(spec, &include_base))
        .collect();

    let excludes = match &layer.exclude {
        Some(exclude) => ExcludeSet::new(exclude.specs.iter().map(String::as_str), &exclude.base),
        None => {
            let mut defaults: Vec<&str> = DEFAULT_EXCLUDES.to_vec();
            defaults.extend(
                ["outDir", "declarationDir"]
                    .into_iter()
                    .filter_map(|name| options.get_str(name)),
            );
            ExcludeSet::new(defaults, base_directory)
        }
    };

    let mut walker = Walker {
        includes: &includes,
        excludes: &excludes,
        allow_js: options.get_bool("allowJs").unwrap_or(false),
        matches: Matches::new(includes.len()),
        visited: HashSet::new(),
    };
    for path in &explicit {
        walker.matches.add_explicit(path);
    }
    for include in &includes {
        let base = include.base();
        if !resolution.host.directory_exists(base) {
            tracing::debug!(base = %base, "include base directory does not exist");
            continue;
        }
        let descend_packages = base
            .components()
            .any(|component| PACKAGE_DIRECTORIES.contains(&component.as_str()));
        walker.walk(resolution, base, descend_packages);
    }

    let mut seen: HashSet<Utf8PathBuf> = HashSet::new();
    let file_names: Vec<Utf8PathBuf> = explicit
        .into_iter()
        .chain(walker.matches.into_paths())
        .filter(|path| seen.insert(path.clone()))
        .collect();

    if file_names.is_empty() {
        let shown_exclude = layer
            .exclude
            .as_ref()
            .map(|exclude| exclude.specs.clone())
            .unwrap_or_default();
        resolution.report(
            Diagnostic::new(format!(
                "No inputs were found in config file '{config_file_path}'. Specified 'include' paths were '{}' and 'exclude' paths were '{}'.",
                specs_json(&include_specs),
                specs_json(&shown_exclude),
            ))
            .with_code(codes::NO_INPUTS_FOUND),
            config_file_path,
        );
    }
    file_names
}
