//! Derived rules enforcing cross-field invariants of the pre-configuration.
//!
//! Rules run once, in order, after every source has been merged. Each rule is
//! a pure function over the store that returns whether it changed an
//! effective value; running the list a second time changes nothing.

use crate::layer::SourceRank;

use super::store::PreConfigStore;
use super::{Allocator, Utf8Mode};

pub(crate) type PreRule = fn(&mut PreConfigStore) -> bool;

pub(crate) const PRE_RULES: [(&str, PreRule); 4] = [
    ("isolation disables environment", isolation_disables_environment),
    ("legacy fs encoding disables utf-8 mode", legacy_fs_encoding_disables_utf8),
    ("dev mode warns on locale coercion", dev_mode_warns_on_coercion),
    ("dev mode selects debug allocator", dev_mode_selects_debug_allocator),
];

/// Apply every rule in order. Returns `true` when any effective value
/// changed.
pub(crate) fn apply_pre_rules(store: &mut PreConfigStore) -> bool {
    let mut changed = false;
    for (name, rule) in PRE_RULES {
        if rule(store) {
            tracing::debug!(rule = name, "derived pre-configuration rule applied");
            changed = true;
        }
    }
    changed
}

fn isolation_disables_environment(store: &mut PreConfigStore) -> bool {
    *store.isolated.get() && store.use_environment.derive(false)
}

fn legacy_fs_encoding_disables_utf8(store: &mut PreConfigStore) -> bool {
    *store.legacy_windows_fs_encoding.get() && store.utf8_mode.derive(Utf8Mode::Off)
}

fn dev_mode_warns_on_coercion(store: &mut PreConfigStore) -> bool {
    *store.dev_mode.get()
        && !store
            .coerce_c_locale_warn
            .is_pinned_at(SourceRank::Environment)
        && store.coerce_c_locale_warn.derive(true)
}

fn dev_mode_selects_debug_allocator(store: &mut PreConfigStore) -> bool {
    *store.dev_mode.get()
        && !store.allocator.is_pinned_at(SourceRank::Environment)
        && store.allocator.derive(Allocator::Debug)
}
