//! Legacy process-global compatibility flags.
//!
//! Older embedding hosts configure the runtime by poking global variables
//! before start-up. They are modelled as one lowest-priority overlay rather
//! than as special cases in the resolvers: a zero or `false` field means the
//! host did not populate that flag.

use crate::config::ConfigOverlay;
use crate::preconfig::{PreConfigOverlay, Utf8Mode};

/// Global flags populated by a legacy host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegacyGlobals {
    /// Isolated mode.
    pub isolated: bool,
    /// Ignore `PYTHON*` environment variables.
    pub ignore_environment: bool,
    /// UTF-8 mode; `None` leaves the decision to other sources.
    pub utf8_mode: Option<bool>,
    /// Legacy Windows filesystem encoding.
    pub legacy_windows_fs_encoding: bool,
    /// Verbosity level.
    pub verbose: u8,
    /// Suppress the interactive banner.
    pub quiet: bool,
    /// Parser debug level.
    pub debug: u8,
    /// Enter interactive mode after running the program.
    pub inspect: bool,
    /// Force interactive mode.
    pub interactive: bool,
    /// Optimisation level.
    pub optimize: u8,
    /// Bytes warning level.
    pub bytes_warning: u8,
    /// Do not add the user site directory.
    pub no_user_site: bool,
    /// Do not import the site module.
    pub no_site: bool,
    /// Do not write bytecode caches.
    pub dont_write_bytecode: bool,
    /// Unbuffered standard streams.
    pub unbuffered: bool,
}

fn level(value: u8) -> Option<u8> {
    (value > 0).then_some(value)
}

impl LegacyGlobals {
    /// Overlay contributed to the pre-configuration.
    #[must_use]
    pub fn pre_overlay(&self) -> PreConfigOverlay {
        PreConfigOverlay {
            isolated: self.isolated.then_some(true),
            use_environment: self.ignore_environment.then_some(false),
            utf8_mode: self.utf8_mode.map(Utf8Mode::from),
            legacy_windows_fs_encoding: self.legacy_windows_fs_encoding.then_some(true),
            ..PreConfigOverlay::default()
        }
    }

    /// Overlay contributed to the configuration.
    #[must_use]
    pub fn config_overlay(&self) -> ConfigOverlay {
        ConfigOverlay {
            isolated: self.isolated.then_some(true),
            use_environment: self.ignore_environment.then_some(false),
            verbose: level(self.verbose),
            quiet: self.quiet.then_some(true),
            parser_debug: level(self.debug),
            inspect: self.inspect.then_some(true),
            interactive: self.interactive.then_some(true),
            optimization_level: level(self.optimize),
            bytes_warning: level(self.bytes_warning),
            user_site_directory: self.no_user_site.then_some(false),
            site_import: self.no_site.then_some(false),
            write_bytecode: self.dont_write_bytecode.then_some(false),
            buffered_stdio: self.unbuffered.then_some(false),
            ..ConfigOverlay::default()
        }
    }
}
