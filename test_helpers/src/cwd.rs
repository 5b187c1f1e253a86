//! Serialised changes to the process working directory.
//!
//! The working directory is process-global, while configuration searches
//! without an explicit start directory begin there. Tests that rely on it
//! take a [`CwdGuard`], which holds a global lock and restores the previous
//! directory on drop.
//!
//! # Examples
//!
//! ```no_run
//! use tsconfig_resolver_test_helpers::cwd;
//!
//! let guard = cwd::set_dir("/tmp/project").expect("set cwd");
//! // Relative searches now start in `/tmp/project`.
//! drop(guard);
//! ```

use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow};
use camino::Utf8PathBuf;
use parking_lot::{Mutex, MutexGuard};

static CWD_MUTEX: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

/// Restores the working directory on drop.
#[must_use = "dropping restores the prior working directory"]
pub struct CwdGuard {
    original: Utf8PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl CwdGuard {
    /// Restore the original directory now, reporting failures.
    ///
    /// # Errors
    ///
    /// Returns an error if `set_current_dir` fails.
    pub fn restore(&self) -> std::io::Result<()> {
        std::env::set_current_dir(&self.original)
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        // Best effort; call `restore()` to observe failures.
        let _unused = std::env::set_current_dir(&self.original);
    }
}

/// Change the working directory to `path` until the guard is dropped.
///
/// The original directory is captured and checked for UTF-8 before anything
/// changes, so a failure never leaves the process elsewhere.
///
/// # Errors
///
/// Returns an error if the current directory cannot be read, is not valid
/// UTF-8, or `path` cannot be entered.
pub fn set_dir(path: impl AsRef<std::path::Path>) -> Result<CwdGuard> {
    let lock = CWD_MUTEX.lock();
    let current = std::env::current_dir().context("read current dir")?;
    let original = Utf8PathBuf::from_path_buf(current)
        .map_err(|non_utf8| anyhow!("cwd is not valid UTF-8: {}", non_utf8.display()))?;
    std::env::set_current_dir(path.as_ref())
        .with_context(|| format!("enter {}", path.as_ref().display()))?;
    Ok(CwdGuard {
        original,
        _lock: lock,
    })
}
