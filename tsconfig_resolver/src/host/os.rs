//! Host backed by the operating system's file system.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

use super::{DirectoryEntries, FileSystem};
use crate::path::{basename, dirname, normalize_path};

/// [`FileSystem`] implementation using `cap-std` directory handles.
///
/// Each query opens the parent directory with ambient authority and then
/// addresses the entry by name, so paths are never interpreted twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

/// Open the parent directory of `path` and return it with the entry name.
fn open_parent_dir_and_name(path: &Utf8Path) -> std::io::Result<(Dir, String)> {
    let name = basename(path.as_str());
    if name.is_empty() {
        return Err(std::io::Error::other(
            "cannot determine entry name for path",
        ));
    }
    let parent = dirname(path.as_str());
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name.to_owned()))
}

impl FileSystem for OsFileSystem {
    fn file_exists(&self, path: &Utf8Path) -> bool {
        open_parent_dir_and_name(path).is_ok_and(|(dir, name)| dir.is_file(name))
    }

    fn directory_exists(&self, path: &Utf8Path) -> bool {
        Dir::open_ambient_dir(path, ambient_authority()).is_ok()
    }

    fn read_file(&self, path: &Utf8Path) -> Option<String> {
        let (dir, name) = open_parent_dir_and_name(path).ok()?;
        match dir.read_to_string(&name) {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::debug!(path = %path, error = %err, "failed to read file");
                None
            }
        }
    }

    fn read_directory(&self, path: &Utf8Path) -> DirectoryEntries {
        let mut entries = DirectoryEntries::default();
        let Ok(dir) = Dir::open_ambient_dir(path, ambient_authority()) else {
            return entries;
        };
        let Ok(listing) = dir.entries() else {
            return entries;
        };
        for entry in listing.flatten() {
            let Ok(name) = entry.file_name() else {
                continue;
            };
            // Symlinked files are followed; symlinked directories are not, so
            // a link back to an ancestor cannot make a walk loop forever.
            match entry.file_type() {
                Ok(kind) if kind.is_dir() => entries.directories.push(name),
                Ok(kind) if kind.is_file() => entries.files.push(name),
                Ok(kind) if kind.is_symlink() && dir.is_file(&name) => entries.files.push(name),
                _ => {}
            }
        }
        entries.files.sort();
        entries.directories.sort();
        entries
    }

    fn current_directory(&self) -> Utf8PathBuf {
        let cwd = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(err) => {
                tracing::warn!(error = %err, "cannot read current directory; using '.'");
                return Utf8PathBuf::from(".");
            }
        };
        #[cfg(windows)]
        let cwd = dunce::simplified(&cwd).to_path_buf();
        Utf8PathBuf::from(normalize_path(&cwd.to_string_lossy()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result, ensure};
    use tempfile::TempDir;

    fn utf8_root(temp: &TempDir) -> Result<Utf8PathBuf> {
        let path = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|p| anyhow::anyhow!("temp dir is not UTF-8: {}", p.display()))?;
        Ok(Utf8PathBuf::from(normalize_path(path.as_str())))
    }

    #[test]
    fn reports_files_and_directories() -> Result<()> {
        let temp = TempDir::new().context("create temp dir")?;
        let root = utf8_root(&temp)?;
        std::fs::create_dir(root.join("src")).context("create src")?;
        std::fs::write(root.join("tsconfig.json"), "{}").context("write config")?;
        std::fs::write(root.join("src/b.ts"), "").context("write b")?;
        std::fs::write(root.join("src/a.ts"), "").context("write a")?;

        let host = OsFileSystem;
        ensure!(host.file_exists(&root.join("tsconfig.json")), "config should exist");
        ensure!(!host.file_exists(&root.join("src")), "directories are not files");
        ensure!(host.directory_exists(&root.join("src")), "src should be a directory");
        ensure!(!host.directory_exists(&root.join("missing")), "missing dir reported");
        ensure!(
            host.read_file(&root.join("tsconfig.json")).as_deref() == Some("{}"),
            "unexpected contents"
        );
        ensure!(host.read_file(&root.join("missing.json")).is_none(), "missing file read");

        let listing = host.read_directory(&root);
        ensure!(listing.files == ["tsconfig.json"], "files {:?}", listing.files);
        ensure!(listing.directories == ["src"], "dirs {:?}", listing.directories);
        let nested = host.read_directory(&root.join("src"));
        ensure!(nested.files == ["a.ts", "b.ts"], "listing must be sorted: {:?}", nested.files);
        Ok(())
    }

    #[test]
    fn root_is_not_a_file() {
        assert!(!OsFileSystem.file_exists(Utf8Path::new("/")));
    }
}
