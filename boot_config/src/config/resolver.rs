//! Configuration resolution.

use crate::env::Environment;
use crate::globals::LegacyGlobals;
use crate::layer::{LayerComposer, OverlayLayer, SourceRank};
use crate::paths::PathProbe;
use crate::preconfig::FrozenPreConfig;
use crate::{BootError, BootResult};

use super::env_vars::read_environment;
use super::rules::{RuleContext, apply_config_rules};
use super::store::ConfigStore;
use super::{ConfigOverlay, Directive, FrozenConfig};

/// Inputs consulted while resolving the configuration.
#[derive(Clone, Copy)]
pub struct ConfigSources<'a> {
    /// Frozen pre-configuration; supplies the decoder and the seed values.
    pub pre: &'a FrozenPreConfig,
    /// Legacy global compatibility flags.
    pub globals: &'a LegacyGlobals,
    /// Environment accessor.
    pub environment: &'a dyn Environment,
    /// Filesystem probe for the path calculation.
    pub paths: &'a dyn PathProbe,
    /// Overlay loaded from configuration files.
    pub file: Option<&'a ConfigOverlay>,
    /// Overlay produced by the command-line parser.
    pub command_line: Option<&'a ConfigOverlay>,
    /// Fields set explicitly by the host.
    pub explicit: Option<&'a ConfigOverlay>,
}

/// Merge every source and apply the derived rules, without freezing.
pub(crate) fn build_store(
    sources: &ConfigSources<'_>,
) -> BootResult<(ConfigStore, Option<Directive>)> {
    let mut store = ConfigStore::seeded(sources.pre);
    let mut composer = LayerComposer::new();
    composer.push_global_compat(sources.globals.config_overlay());
    if let Some(file) = sources.file {
        composer.push_file(file.clone());
    }
    if let Some(command_line) = sources.command_line {
        composer.push_command_line(command_line.clone());
    }
    if let Some(explicit) = sources.explicit {
        composer.push_explicit(explicit.clone());
    }
    for layer in composer {
        store.apply(&layer)?;
    }

    if *store.use_environment.layered() {
        let overlay = read_environment(sources.environment, sources.pre.decoder())?;
        store.apply(&OverlayLayer::new(SourceRank::Environment, overlay))?;
    } else {
        tracing::debug!("environment ignored while resolving configuration");
    }

    store.directive = store.directives.resolve()?;
    apply_config_rules(
        &mut store,
        RuleContext {
            pre: sources.pre,
            paths: sources.paths,
        },
    );
    let directive = store.directive.as_ref().map(|(_, directive)| directive.clone());
    Ok((store, directive))
}

/// Resolve and freeze the configuration.
///
/// # Errors
///
/// Returns a user error for undecodable or malformed environment values,
/// malformed `-X` options, conflicting execution directives and a
/// `dev_mode`, `isolated` or `use_environment` that differs from the frozen
/// pre-configuration, and [`crate::BootError::NoMemory`] when decoding
/// cannot allocate.
pub fn resolve_config(sources: &ConfigSources<'_>) -> BootResult<FrozenConfig> {
    let (store, directive) = build_store(sources)?;
    let config = FrozenConfig::freeze(&store, sources.pre, directive);
    ensure_agrees_with_pre(&config, sources.pre)?;
    tracing::debug!(
        program_name = %config.program_name,
        prefix = %config.prefix,
        isolated = config.isolated,
        use_environment = config.use_environment,
        warnoptions = %config.warnoptions,
        "configuration resolved"
    );
    Ok(config)
}

/// The pre-configuration has already acted on these fields, so the
/// configuration may not change them.
fn ensure_agrees_with_pre(config: &FrozenConfig, pre: &FrozenPreConfig) -> BootResult<()> {
    let fields = [
        ("dev_mode", config.dev_mode, pre.dev_mode),
        ("isolated", config.isolated, pre.isolated),
        ("use_environment", config.use_environment, pre.use_environment),
    ];
    for (field, resolved, frozen) in fields {
        if resolved != frozen {
            return Err(BootError::user(
                "config",
                format!(
                    "{field} resolved to {resolved} after pre-initialisation froze it as \
                     {frozen}; set it before pre-initialising"
                ),
            ));
        }
    }
    Ok(())
}
