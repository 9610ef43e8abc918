//! Search-path calculation: executable, prefixes and module search path.
//!
//! The calculation only queries the filesystem through [`PathProbe`], so
//! hosts and tests can run it against a synthetic tree.

mod calculate;
mod probe;

pub use calculate::{PathFamily, PathInputs, calculate};
pub use probe::{FsProbe, PathProbe};

/// Runtime version reported by `--version`.
pub const RUNTIME_VERSION: &str = "3.12";
/// Library directory below a prefix.
pub const LIB_DIR: &str = "lib";
/// Versioned standard-library directory below [`LIB_DIR`].
pub const STDLIB_DIR: &str = "python3.12";
/// File whose presence marks the standard library.
pub const LANDMARK: &str = "os.py";
/// Directory of extension modules below the standard library.
pub const DYNLOAD_DIR: &str = "lib-dynload";
/// Zipped standard library below [`LIB_DIR`].
pub const STDLIB_ZIP: &str = "python312.zip";
/// Prefix used when no landmark is found.
pub const DEFAULT_PREFIX: &str = "/usr/local";
/// Separator between entries of `PATH`, `PYTHONPATH` and `home`.
pub const DELIMITER: char = if cfg!(windows) { ';' } else { ':' };
