//! Filesystem queries used by the path calculation.

use camino::{Utf8Path, Utf8PathBuf};

/// Filesystem view consulted while computing paths.
pub trait PathProbe {
    /// Returns `true` when `path` is an existing regular file.
    fn is_file(&self, path: &Utf8Path) -> bool;

    /// Returns `true` when `path` is an existing directory.
    fn is_dir(&self, path: &Utf8Path) -> bool;

    /// Current working directory, when representable as UTF-8.
    fn current_dir(&self) -> Option<Utf8PathBuf>;

    /// Value of the executable search path (`PATH`).
    fn search_path(&self) -> Option<String>;
}

/// Probe backed by the real filesystem and process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn is_file(&self, path: &Utf8Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Utf8Path) -> bool {
        path.is_dir()
    }

    fn current_dir(&self) -> Option<Utf8PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Utf8PathBuf::from_path_buf(cwd).ok()
    }

    fn search_path(&self) -> Option<String> {
        std::env::var("PATH").ok()
    }
}
