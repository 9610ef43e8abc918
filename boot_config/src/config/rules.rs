//! Derived rules enforcing cross-field invariants of the configuration.
//!
//! The list runs once, in order, after every source has been merged. Rules
//! only install derived overrides, and each one checks the effective value
//! first, so applying the list to its own output changes nothing.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};

use crate::StringList;
use crate::layer::{SourceRank, ValueSlot};
use crate::paths::{PathInputs, PathProbe, calculate};
use crate::preconfig::FrozenPreConfig;

use super::store::ConfigStore;

/// Read-only collaborators a rule may consult.
#[derive(Clone, Copy)]
pub(crate) struct RuleContext<'a> {
    pub(crate) pre: &'a FrozenPreConfig,
    pub(crate) paths: &'a dyn PathProbe,
}

pub(crate) type ConfigRule = fn(&mut ConfigStore, RuleContext<'_>) -> bool;

pub(crate) const CONFIG_RULES: [(&str, ConfigRule); 8] = [
    ("isolation disables environment and user site", isolation),
    ("dev mode enables faulthandler", dev_mode_faulthandler),
    ("warning filters", warning_filters),
    ("filesystem codec", filesystem_codec),
    ("stdio codec", stdio_codec),
    ("argv follows directive", argv_follows_directive),
    ("program name and argv", program_name_and_argv),
    ("path family", path_family),
];

/// Bytes warning filter for `level`, if any.
const fn bytes_warning_filter(level: u8) -> Option<&'static str> {
    match level {
        0 => None,
        1 => Some("default::BytesWarning"),
        _ => Some("error::BytesWarning"),
    }
}

/// Apply every rule in order. Returns `true` when any effective value
/// changed.
pub(crate) fn apply_config_rules(store: &mut ConfigStore, context: RuleContext<'_>) -> bool {
    let mut changed = false;
    for (name, rule) in CONFIG_RULES {
        if rule(store, context) {
            tracing::debug!(rule = name, "derived configuration rule applied");
            changed = true;
        }
    }
    changed
}

fn isolation(store: &mut ConfigStore, _: RuleContext<'_>) -> bool {
    if !*store.isolated.get() {
        return false;
    }
    let environment = store.use_environment.derive(false);
    let user_site = store.user_site_directory.derive(false);
    environment || user_site
}

fn dev_mode_faulthandler(store: &mut ConfigStore, _: RuleContext<'_>) -> bool {
    *store.dev_mode.get() && !store.faulthandler.is_pinned() && store.faulthandler.derive(true)
}

fn warning_filters(store: &mut ConfigStore, _: RuleContext<'_>) -> bool {
    let mut filters: StringList = store.warnings_at(SourceRank::Explicit).collect();
    if *store.dev_mode.get() {
        filters.push_unique("default");
    }
    for rank in [
        SourceRank::GlobalCompat,
        SourceRank::Environment,
        SourceRank::ConfigFile,
        SourceRank::CommandLine,
    ] {
        for entry in store.warnings_at(rank) {
            filters.push_unique(entry);
        }
    }
    if let Some(filter) = bytes_warning_filter(*store.bytes_warning.get()) {
        filters.push_unique(filter);
    }
    store.warnoptions.derive(filters)
}

fn filesystem_codec(store: &mut ConfigStore, context: RuleContext<'_>) -> bool {
    let pre = context.pre;
    let (encoding, errors) = if pre.utf8_mode {
        ("utf-8", "surrogateescape")
    } else if pre.legacy_windows_fs_encoding {
        ("mbcs", "replace")
    } else if cfg!(windows) {
        ("utf-8", "surrogatepass")
    } else {
        (pre.filesystem_codec.name(), "surrogateescape")
    };
    let encoding = fill_unset(&mut store.filesystem_encoding, encoding);
    let errors = fill_unset(&mut store.filesystem_errors, errors);
    encoding || errors
}

fn stdio_codec(store: &mut ConfigStore, context: RuleContext<'_>) -> bool {
    let pre = context.pre;
    let errors = if pre.utf8_mode || pre.legacy_locale() {
        "surrogateescape"
    } else {
        "strict"
    };
    let encoding = fill_unset(&mut store.stdio_encoding, pre.filesystem_codec.name());
    let errors = fill_unset(&mut store.stdio_errors, errors);
    encoding || errors
}

/// `argv[0]` from a source other than the winning directive's describes a
/// directive that lost; replace it with the winner's. Host-set `argv` is
/// kept as given.
fn argv_follows_directive(store: &mut ConfigStore, _: RuleContext<'_>) -> bool {
    let Some((rank, directive)) = &store.directive else {
        return false;
    };
    let source = store.argv.rank();
    if source == *rank || source == SourceRank::Explicit {
        return false;
    }
    let mut argv = StringList::new();
    argv.push(directive.argv0());
    if let Some(layered) = store.argv.layered() {
        argv.extend(layered.iter().skip(1));
    }
    store.argv.derive(Some(argv))
}

fn program_name_and_argv(store: &mut ConfigStore, _: RuleContext<'_>) -> bool {
    let program_name = store
        .orig_argv
        .get()
        .as_ref()
        .and_then(StringList::first)
        .filter(|name| !name.is_empty())
        .unwrap_or("python3")
        .to_owned();
    let name = fill_unset(&mut store.program_name, &program_name);
    let argv = store.argv.get().is_none()
        && store
            .argv
            .derive(Some(StringList::from(vec![String::new()])));
    name || argv
}

fn path_family(store: &mut ConfigStore, context: RuleContext<'_>) -> bool {
    let family = {
        let inputs = PathInputs {
            program_name: store.program_name.get().as_deref().unwrap_or_default(),
            executable: pinned_path(&store.executable),
            home: store.home.get().as_deref(),
            prefix: pinned_path(&store.prefix),
            exec_prefix: pinned_path(&store.exec_prefix),
            pythonpath: store.pythonpath_env.get().as_deref(),
        };
        calculate(&inputs, context.paths)
    };
    let mut changed = derive_unpinned(&mut store.executable, family.executable);
    changed |= derive_unpinned(&mut store.prefix, Some(family.prefix));
    changed |= derive_unpinned(&mut store.exec_prefix, Some(family.exec_prefix));
    let prefix = store.prefix.get().clone();
    changed |= derive_unpinned(&mut store.base_prefix, prefix);
    let exec_prefix = store.exec_prefix.get().clone();
    changed |= derive_unpinned(&mut store.base_exec_prefix, exec_prefix);
    changed |= derive_unpinned(
        &mut store.module_search_paths,
        Some(family.module_search_paths),
    );
    changed
}

fn fill_unset(slot: &mut ValueSlot<Option<String>>, value: &str) -> bool {
    slot.get().is_none() && slot.derive(Some(value.to_owned()))
}

/// Path fields are computed unless a configuration file or a more trusted
/// source pinned them.
fn pinned_path(slot: &ValueSlot<Option<Utf8PathBuf>>) -> Option<&Utf8Path> {
    if slot.is_pinned_at(SourceRank::ConfigFile) {
        slot.layered().as_deref()
    } else {
        None
    }
}

fn derive_unpinned<T: fmt::Debug + PartialEq>(slot: &mut ValueSlot<T>, value: T) -> bool {
    !slot.is_pinned_at(SourceRank::ConfigFile) && slot.derive(value)
}
