//! Pre-configuration resolution.

use crate::argv::prescan;
use crate::env::Environment;
use crate::globals::LegacyGlobals;
use crate::layer::{LayerComposer, OverlayLayer, SourceRank};
use crate::{BootResult, RawArg};

use super::env_vars::read_environment;
use super::locale::LocaleProbe;
use super::rules::apply_pre_rules;
use super::store::PreConfigStore;
use super::{FrozenPreConfig, PreConfigOverlay};

/// Inputs consulted while resolving the pre-configuration.
#[derive(Clone, Copy)]
pub struct PreConfigSources<'a> {
    /// Legacy global compatibility flags.
    pub globals: &'a LegacyGlobals,
    /// Environment accessor.
    pub environment: &'a dyn Environment,
    /// `LC_CTYPE` probe.
    pub locale: &'a dyn LocaleProbe,
    /// Raw command-line arguments, including the program name.
    pub args: Option<&'a [RawArg]>,
    /// Pre-configuration fields implied by the configuration files.
    pub file: Option<&'a PreConfigOverlay>,
    /// Fields set explicitly by the host.
    pub explicit: Option<&'a PreConfigOverlay>,
}

/// Resolve and freeze the pre-configuration.
///
/// Non-environment sources are merged first so the environment gate sees the
/// layered `use_environment` of every other source; the rank discipline of
/// the store makes the merge order irrelevant to the winning values.
///
/// # Errors
///
/// Returns a user error for malformed environment values such as an unknown
/// `PYTHONMALLOC` allocator or an invalid `PYTHONUTF8`, and for an invalid
/// `-X utf8` option.
pub fn resolve_preconfig(sources: &PreConfigSources<'_>) -> BootResult<FrozenPreConfig> {
    let mut store = PreConfigStore::default();
    let mut composer = LayerComposer::new();
    composer.push_global_compat(sources.globals.pre_overlay());
    if let Some(file) = sources.file {
        composer.push_file(file.clone());
    }
    if let Some(args) = sources.args {
        composer.push_command_line(prescan(args)?);
    }
    if let Some(explicit) = sources.explicit {
        composer.push_explicit(explicit.clone());
    }
    for layer in composer {
        store.apply(&layer);
    }

    if *store.use_environment.layered() {
        let overlay = read_environment(sources.environment)?;
        store.apply(&OverlayLayer::new(SourceRank::Environment, overlay));
    } else {
        tracing::debug!("environment ignored while resolving pre-configuration");
    }

    apply_pre_rules(&mut store);
    let frozen = FrozenPreConfig::freeze(&store, sources.locale);
    tracing::debug!(
        allocator = %frozen.allocator,
        utf8_mode = frozen.utf8_mode,
        coerce_locale = frozen.coerce_locale,
        codec = %frozen.filesystem_codec,
        "pre-configuration resolved"
    );
    Ok(frozen)
}
