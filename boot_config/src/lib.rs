//! Layered runtime-configuration resolution and bootstrap sequencing.
//!
//! A language runtime starts from several overlapping, differently trusted
//! sources: compiled defaults, legacy global flags, environment variables, a
//! configuration file, the command line and values set explicitly by the
//! embedding host. This crate resolves them in two phases:
//!
//! 1. [`resolve_preconfig`] settles allocator, locale coercion, UTF-8 mode
//!    and whether the environment is consulted, before any raw byte string is
//!    decoded.
//! 2. [`resolve_config`] resolves the full field set with decoding available
//!    and applies the derived rules.
//!
//! [`Bootstrap`] drives both phases and the hand-off to a [`Runtime`] as a
//! one-way state machine.
//!
//! ```rust
//! use boot_config::{
//!     Bootstrap, FixedLocale, FrozenConfig, MapEnvironment, NoopHooks, RawArg,
//! };
//!
//! let env = MapEnvironment::new()
//!     .with("PYTHONUTF8", "1")
//!     .with("PYTHONDONTWRITEBYTECODE", "1");
//! let mut bootstrap = Bootstrap::new()
//!     .with_environment(env)
//!     .with_locale(FixedLocale::new("C"))
//!     .with_hooks(NoopHooks)
//!     .with_runtime(|_: &FrozenConfig| 0);
//!
//! let args: Vec<RawArg> = ["python", "-I", "-c", "pass"].map(RawArg::from).into();
//! assert!(bootstrap.initialize_from_args(None, &args).is_ok());
//!
//! let config = bootstrap.config().expect("configuration resolved");
//! assert!(config.isolated);
//! assert!(!config.use_environment);
//! assert!(!config.write_bytecode);
//! assert!(bootstrap.pre_config().expect("pre-initialised").utf8_mode);
//! ```

/// Write every `Some` field of an overlay into the slot of the same name.
macro_rules! write_fields {
    ($store:expr, $overlay:expr, $rank:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$overlay.$field {
                $store.$field.set(Clone::clone(value), $rank);
            }
        )+
    };
}

/// As `write_fields!`, for slots that hold an `Option`.
macro_rules! write_optional_fields {
    ($store:expr, $overlay:expr, $rank:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$overlay.$field {
                $store.$field.set(Some(Clone::clone(value)), $rank);
            }
        )+
    };
}

mod argv;
mod bootstrap;
mod codec;
mod config;
mod env;
mod error;
mod file;
mod globals;
pub mod layer;
pub mod paths;
mod preconfig;
mod result_ext;
mod string_list;

pub use argv::{ArgvParser, ClapArgvParser, USAGE_ERROR_STATUS};
pub use bootstrap::{
    BootState, Bootstrap, GlobalProcessState, NoopHooks, ProcessHooks, ProcessState, Runtime,
    initialize_from_args, initialize_from_config, install, pre_initialize,
    pre_initialize_from_args, process_state, reset, run_main, with_process_bootstrap,
};
pub use codec::{Decoder, RawArg, TextCodec};
pub use config::{
    ConfigOverlay, ConfigSources, Directive, FrozenConfig, HashPycsMode, RunMode, resolve_config,
};
pub use env::{Environment, MapEnvironment, ProcessEnvironment};
pub use error::{BootError, BootResult, ErrorKind, Outcome, exit_on_error, is_display_request};
pub use file::{ConfigFileLoader, TomlFileLoader};
pub use globals::LegacyGlobals;
pub use paths::{FsProbe, PathProbe};
pub use preconfig::{
    Allocator, COERCION_TARGET, CoerceLocale, EnvLocaleProbe, FixedLocale, FrozenPreConfig,
    LocaleProbe, PreConfigOverlay, PreConfigSources, UnknownAllocator, Utf8Mode,
    resolve_preconfig,
};
pub use result_ext::BootResultExt;
pub use string_list::StringList;
