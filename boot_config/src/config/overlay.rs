//! Partial configuration supplied by one source.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::argv::apply_pre_xoption;
use crate::preconfig::{PreConfigOverlay, Utf8Mode};
use crate::{BootResult, StringList};

use super::HashPycsMode;

/// Every configuration field as an `Option`; `None` leaves the field to
/// lower-ranked sources.
///
/// The same type backs explicit host overlays, configuration files and the
/// output of the command-line parser.
///
/// ```rust
/// use boot_config::ConfigOverlay;
///
/// let overlay: ConfigOverlay = toml::from_str("verbose = 2\nwarnoptions = [\"error\"]")?;
/// assert_eq!(overlay.verbose, Some(2));
/// # Ok::<(), toml::de::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverlay {
    /// Program name used to locate the executable.
    pub program_name: Option<String>,
    /// Installation home, `prefix[:exec_prefix]`.
    pub home: Option<Utf8PathBuf>,
    /// Installation prefix.
    pub prefix: Option<Utf8PathBuf>,
    /// Platform-specific installation prefix.
    pub exec_prefix: Option<Utf8PathBuf>,
    /// Prefix of the base installation.
    pub base_prefix: Option<Utf8PathBuf>,
    /// Exec prefix of the base installation.
    pub base_exec_prefix: Option<Utf8PathBuf>,
    /// Absolute path of the runtime executable.
    pub executable: Option<Utf8PathBuf>,
    /// Module search path entries.
    pub module_search_paths: Option<StringList>,
    /// Extra search path entries, delimiter separated.
    pub pythonpath_env: Option<String>,
    /// Directory holding bytecode caches.
    pub pycache_prefix: Option<Utf8PathBuf>,
    /// Filesystem encoding.
    pub filesystem_encoding: Option<String>,
    /// Filesystem error handler.
    pub filesystem_errors: Option<String>,
    /// Standard stream encoding.
    pub stdio_encoding: Option<String>,
    /// Standard stream error handler.
    pub stdio_errors: Option<String>,
    /// Source text to execute.
    pub run_command: Option<String>,
    /// Module to run.
    pub run_module: Option<String>,
    /// Script to run.
    pub run_filename: Option<Utf8PathBuf>,
    /// Arguments visible to the program.
    pub argv: Option<StringList>,
    /// Arguments as received by the host.
    pub orig_argv: Option<StringList>,
    /// Isolated mode.
    pub isolated: Option<bool>,
    /// Consult `PYTHON*` environment variables.
    pub use_environment: Option<bool>,
    /// Development mode.
    pub dev_mode: Option<bool>,
    /// UTF-8 mode. Only consulted when initialisation pre-initialises
    /// implicitly; the configuration itself has no UTF-8 mode field.
    pub utf8_mode: Option<bool>,
    /// Add the user site directory to the search path.
    pub user_site_directory: Option<bool>,
    /// Import the site module at start-up.
    pub site_import: Option<bool>,
    /// Write bytecode caches.
    pub write_bytecode: Option<bool>,
    /// Buffer the standard streams.
    pub buffered_stdio: Option<bool>,
    /// Enter interactive mode after running the program.
    pub inspect: Option<bool>,
    /// Force interactive mode.
    pub interactive: Option<bool>,
    /// Suppress the interactive banner.
    pub quiet: Option<bool>,
    /// Skip the first line of the script.
    pub skip_source_first_line: Option<bool>,
    /// Install the fault handler.
    pub faulthandler: Option<bool>,
    /// Report import timings.
    pub import_time: Option<bool>,
    /// Dump live references at exit.
    pub dump_refs: Option<bool>,
    /// Print allocator statistics at exit.
    pub malloc_stats: Option<bool>,
    /// Verbosity level.
    pub verbose: Option<u8>,
    /// Parser debug level.
    pub parser_debug: Option<u8>,
    /// Optimisation level.
    pub optimization_level: Option<u8>,
    /// Bytes warning level.
    pub bytes_warning: Option<u8>,
    /// Frames recorded by the memory tracer; zero disables it.
    pub tracemalloc: Option<u16>,
    /// Use a fixed hash seed.
    pub use_hash_seed: Option<bool>,
    /// Fixed hash seed.
    pub hash_seed: Option<u32>,
    /// Use frozen standard modules.
    pub use_frozen_modules: Option<bool>,
    /// Hash-based bytecode cache validation.
    pub check_hash_pycs_mode: Option<HashPycsMode>,
    /// Warning filters contributed by this source.
    pub warnoptions: Option<StringList>,
    /// `-X` options contributed by this source.
    pub xoptions: Option<StringList>,
}

impl ConfigOverlay {
    /// Pre-configuration implied by this overlay: the gate fields, UTF-8
    /// mode and the `-X dev`/`-X utf8` options.
    ///
    /// # Errors
    ///
    /// Returns a user error for an invalid `-X utf8` value.
    pub fn pre_overlay(&self) -> BootResult<PreConfigOverlay> {
        let mut overlay = PreConfigOverlay {
            isolated: self.isolated,
            use_environment: self.use_environment,
            dev_mode: self.dev_mode,
            ..PreConfigOverlay::default()
        };
        for option in self.xoptions.iter().flat_map(StringList::iter) {
            apply_pre_xoption(&mut overlay, option.as_bytes())?;
        }
        if let Some(utf8_mode) = self.utf8_mode {
            overlay.utf8_mode = Some(Utf8Mode::from(utf8_mode));
        }
        Ok(overlay)
    }
}
