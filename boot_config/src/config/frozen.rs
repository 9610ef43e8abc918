//! Immutable configuration handed to the runtime.

use camino::Utf8PathBuf;
use serde::Serialize;

use crate::StringList;
use crate::paths::DEFAULT_PREFIX;
use crate::preconfig::{Allocator, FrozenPreConfig};

use super::store::ConfigStore;
use super::{Directive, HashPycsMode, RunMode};

/// Fully resolved configuration.
///
/// Produced by [`crate::resolve_config`]. It is immutable, `Send + Sync`
/// and can be shared behind an `Arc` once the bootstrap finishes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrozenConfig {
    /// Program name used to locate the executable.
    pub program_name: String,
    /// Installation home override.
    pub home: Option<Utf8PathBuf>,
    /// Absolute path of the runtime executable, when located.
    pub executable: Option<Utf8PathBuf>,
    /// Installation prefix.
    pub prefix: Utf8PathBuf,
    /// Platform-specific installation prefix.
    pub exec_prefix: Utf8PathBuf,
    /// Prefix of the base installation.
    pub base_prefix: Utf8PathBuf,
    /// Exec prefix of the base installation.
    pub base_exec_prefix: Utf8PathBuf,
    /// Module search path, highest priority first.
    pub module_search_paths: StringList,
    /// Directory holding bytecode caches.
    pub pycache_prefix: Option<Utf8PathBuf>,
    /// Filesystem encoding.
    pub filesystem_encoding: String,
    /// Filesystem error handler.
    pub filesystem_errors: String,
    /// Standard stream encoding.
    pub stdio_encoding: String,
    /// Standard stream error handler.
    pub stdio_errors: String,
    /// Program to execute; `None` runs interactively or reads stdin.
    pub directive: Option<Directive>,
    /// Arguments visible to the program.
    pub argv: StringList,
    /// Arguments as received by the host.
    pub orig_argv: StringList,
    /// `-X` options of every source, lowest rank first.
    pub xoptions: StringList,
    /// Warning filters, in the order the warnings machinery installs them.
    pub warnoptions: StringList,
    /// Isolated mode.
    pub isolated: bool,
    /// Whether `PYTHON*` variables were consulted.
    pub use_environment: bool,
    /// Development mode.
    pub dev_mode: bool,
    /// Memory allocator adopted by the pre-configuration.
    pub allocator: Allocator,
    /// Add the user site directory.
    pub user_site_directory: bool,
    /// Import the site module.
    pub site_import: bool,
    /// Write bytecode caches.
    pub write_bytecode: bool,
    /// Buffer the standard streams.
    pub buffered_stdio: bool,
    /// Enter interactive mode after the program.
    pub inspect: bool,
    /// Force interactive mode.
    pub interactive: bool,
    /// Suppress the interactive banner.
    pub quiet: bool,
    /// Skip the first source line.
    pub skip_source_first_line: bool,
    /// Install the fault handler.
    pub faulthandler: bool,
    /// Report import timings.
    pub import_time: bool,
    /// Dump live references at exit.
    pub dump_refs: bool,
    /// Print allocator statistics at exit.
    pub malloc_stats: bool,
    /// Verbosity level.
    pub verbose: u8,
    /// Parser debug level.
    pub parser_debug: u8,
    /// Optimisation level.
    pub optimization_level: u8,
    /// Bytes warning level.
    pub bytes_warning: u8,
    /// Frames recorded by the memory tracer.
    pub tracemalloc: u16,
    /// Use [`FrozenConfig::hash_seed`] instead of a random seed.
    pub use_hash_seed: bool,
    /// Fixed hash seed.
    pub hash_seed: u32,
    /// Use frozen standard modules.
    pub use_frozen_modules: bool,
    /// Hash-based bytecode cache validation.
    pub check_hash_pycs_mode: HashPycsMode,
}

fn prefix_or_default(value: Option<&Utf8PathBuf>) -> Utf8PathBuf {
    value
        .cloned()
        .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_PREFIX))
}

impl FrozenConfig {
    pub(crate) fn freeze(
        store: &ConfigStore,
        pre: &FrozenPreConfig,
        directive: Option<Directive>,
    ) -> Self {
        Self {
            program_name: store.program_name.get().clone().unwrap_or_default(),
            home: store.home.get().clone(),
            executable: store.executable.get().clone(),
            prefix: prefix_or_default(store.prefix.get().as_ref()),
            exec_prefix: prefix_or_default(store.exec_prefix.get().as_ref()),
            base_prefix: prefix_or_default(store.base_prefix.get().as_ref()),
            base_exec_prefix: prefix_or_default(store.base_exec_prefix.get().as_ref()),
            module_search_paths: store.module_search_paths.get().clone().unwrap_or_default(),
            pycache_prefix: store.pycache_prefix.get().clone(),
            filesystem_encoding: store.filesystem_encoding.get().clone().unwrap_or_default(),
            filesystem_errors: store.filesystem_errors.get().clone().unwrap_or_default(),
            stdio_encoding: store.stdio_encoding.get().clone().unwrap_or_default(),
            stdio_errors: store.stdio_errors.get().clone().unwrap_or_default(),
            directive,
            argv: store.argv.get().clone().unwrap_or_default(),
            orig_argv: store.orig_argv.get().clone().unwrap_or_default(),
            xoptions: store.xoptions(),
            warnoptions: store.warnoptions.get().clone(),
            isolated: *store.isolated.get(),
            use_environment: *store.use_environment.get(),
            dev_mode: *store.dev_mode.get(),
            allocator: pre.allocator,
            user_site_directory: *store.user_site_directory.get(),
            site_import: *store.site_import.get(),
            write_bytecode: *store.write_bytecode.get(),
            buffered_stdio: *store.buffered_stdio.get(),
            inspect: *store.inspect.get(),
            interactive: *store.interactive.get(),
            quiet: *store.quiet.get(),
            skip_source_first_line: *store.skip_source_first_line.get(),
            faulthandler: *store.faulthandler.get(),
            import_time: *store.import_time.get(),
            dump_refs: *store.dump_refs.get(),
            malloc_stats: *store.malloc_stats.get(),
            verbose: *store.verbose.get(),
            parser_debug: *store.parser_debug.get(),
            optimization_level: *store.optimization_level.get(),
            bytes_warning: *store.bytes_warning.get(),
            tracemalloc: *store.tracemalloc.get(),
            use_hash_seed: *store.use_hash_seed.get(),
            hash_seed: *store.hash_seed.get(),
            use_frozen_modules: *store.use_frozen_modules.get(),
            check_hash_pycs_mode: *store.check_hash_pycs_mode.get(),
        }
    }

    /// How the runtime entry point should run.
    ///
    /// A script named `-` reads the program from standard input; with no
    /// directive the prompt is interactive unless standard input is piped,
    /// which the host signals by leaving `interactive` and `inspect` unset.
    #[must_use]
    pub fn run_mode(&self) -> RunMode<'_> {
        match &self.directive {
            Some(Directive::Command(command)) => RunMode::Command(command),
            Some(Directive::Module(module)) => RunMode::Module(module),
            Some(Directive::Filename(path)) if path.as_str() == "-" => RunMode::Stdin,
            Some(Directive::Filename(path)) => RunMode::Filename(path),
            None if self.interactive || self.inspect => RunMode::Interactive,
            None => RunMode::Stdin,
        }
    }
}
