//! POSIX-style prefix and search-path calculation.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::StringList;

use super::{
    DEFAULT_PREFIX, DELIMITER, DYNLOAD_DIR, LANDMARK, LIB_DIR, PathProbe, STDLIB_DIR, STDLIB_ZIP,
};

/// Inputs to [`calculate`]. Pinned values are used as given; `None` means
/// "compute it".
#[derive(Clone, Copy, Debug, Default)]
pub struct PathInputs<'a> {
    /// Program name, usually `argv[0]`.
    pub program_name: &'a str,
    /// Executable pinned by a trusted source.
    pub executable: Option<&'a Utf8Path>,
    /// `prefix[:exec_prefix]` override.
    pub home: Option<&'a Utf8Path>,
    /// Prefix pinned by a trusted source.
    pub prefix: Option<&'a Utf8Path>,
    /// Exec prefix pinned by a trusted source.
    pub exec_prefix: Option<&'a Utf8Path>,
    /// Extra search path entries.
    pub pythonpath: Option<&'a str>,
}

/// Result of the path calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathFamily {
    /// Absolute executable path, when it could be located.
    pub executable: Option<Utf8PathBuf>,
    /// Installation prefix.
    pub prefix: Utf8PathBuf,
    /// Platform-specific installation prefix.
    pub exec_prefix: Utf8PathBuf,
    /// Module search path, highest priority first.
    pub module_search_paths: StringList,
}

/// Compute the path family.
///
/// `home` short-circuits the landmark search. Otherwise the directories
/// above the executable are searched for the standard library landmark and
/// the extension module directory, falling back to [`DEFAULT_PREFIX`].
#[must_use]
pub fn calculate(inputs: &PathInputs<'_>, probe: &dyn PathProbe) -> PathFamily {
    let executable = inputs
        .executable
        .map(Utf8Path::to_path_buf)
        .or_else(|| find_executable(inputs.program_name, probe));
    let start = executable.as_deref().and_then(Utf8Path::parent);
    let (home_prefix, home_exec_prefix) = split_home(inputs.home);

    let prefix = inputs
        .prefix
        .map(Utf8Path::to_path_buf)
        .or(home_prefix)
        .or_else(|| search_upward(start, |dir| probe.is_file(&stdlib(dir).join(LANDMARK))))
        .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_PREFIX));
    let exec_prefix = inputs
        .exec_prefix
        .map(Utf8Path::to_path_buf)
        .or(home_exec_prefix)
        .or_else(|| search_upward(start, |dir| probe.is_dir(&stdlib(dir).join(DYNLOAD_DIR))))
        .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_PREFIX));

    let mut module_search_paths: StringList = inputs
        .pythonpath
        .into_iter()
        .flat_map(|value| value.split(DELIMITER))
        .filter(|entry| !entry.is_empty())
        .collect();
    module_search_paths.push(prefix.join(LIB_DIR).join(STDLIB_ZIP).into_string());
    module_search_paths.push(stdlib(&prefix).into_string());
    module_search_paths.push(stdlib(&exec_prefix).join(DYNLOAD_DIR).into_string());

    PathFamily {
        executable,
        prefix,
        exec_prefix,
        module_search_paths,
    }
}

fn stdlib(prefix: &Utf8Path) -> Utf8PathBuf {
    prefix.join(LIB_DIR).join(STDLIB_DIR)
}

/// `home` names the prefix; an optional second entry names the exec prefix.
fn split_home(home: Option<&Utf8Path>) -> (Option<Utf8PathBuf>, Option<Utf8PathBuf>) {
    let Some(home) = home.map(Utf8Path::as_str).filter(|home| !home.is_empty()) else {
        return (None, None);
    };
    let (prefix, exec_prefix) = home.split_once(DELIMITER).unwrap_or((home, home));
    (
        Some(Utf8PathBuf::from(prefix)),
        Some(Utf8PathBuf::from(exec_prefix)),
    )
}

fn search_upward(
    start: Option<&Utf8Path>,
    matches: impl Fn(&Utf8Path) -> bool,
) -> Option<Utf8PathBuf> {
    start?
        .ancestors()
        .find(|dir| !dir.as_str().is_empty() && matches(dir))
        .map(Utf8Path::to_path_buf)
}

fn find_executable(program_name: &str, probe: &dyn PathProbe) -> Option<Utf8PathBuf> {
    if program_name.is_empty() {
        return None;
    }
    let program = Utf8Path::new(program_name);
    if program_name.contains(std::path::MAIN_SEPARATOR) {
        return Some(absolutize(program, probe));
    }
    let search_path = probe.search_path()?;
    search_path
        .split(DELIMITER)
        .map(|dir| if dir.is_empty() { "." } else { dir })
        .map(|dir| Utf8Path::new(dir).join(program))
        .find(|candidate| probe.is_file(candidate))
        .map(|candidate| absolutize(&candidate, probe))
}

fn absolutize(path: &Utf8Path, probe: &dyn PathProbe) -> Utf8PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    probe
        .current_dir()
        .map_or_else(|| path.to_path_buf(), |cwd| cwd.join(path))
}
