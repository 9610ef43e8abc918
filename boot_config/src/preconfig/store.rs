//! Layered store backing the pre-configuration resolver.

use crate::layer::{OverlayLayer, ValueSlot};

use super::{Allocator, CoerceLocale, PreConfigOverlay, Utf8Mode};

/// Slot per pre-configuration field, seeded with compiled defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PreConfigStore {
    pub(crate) allocator: ValueSlot<Allocator>,
    pub(crate) coerce_c_locale: ValueSlot<CoerceLocale>,
    pub(crate) coerce_c_locale_warn: ValueSlot<bool>,
    pub(crate) utf8_mode: ValueSlot<Utf8Mode>,
    pub(crate) isolated: ValueSlot<bool>,
    pub(crate) use_environment: ValueSlot<bool>,
    pub(crate) dev_mode: ValueSlot<bool>,
    pub(crate) legacy_windows_fs_encoding: ValueSlot<bool>,
}

impl Default for PreConfigStore {
    fn default() -> Self {
        Self {
            allocator: ValueSlot::new(Allocator::Default),
            coerce_c_locale: ValueSlot::new(CoerceLocale::Probe),
            coerce_c_locale_warn: ValueSlot::new(false),
            utf8_mode: ValueSlot::new(Utf8Mode::Auto),
            isolated: ValueSlot::new(false),
            use_environment: ValueSlot::new(true),
            dev_mode: ValueSlot::new(false),
            legacy_windows_fs_encoding: ValueSlot::new(false),
        }
    }
}

impl PreConfigStore {
    /// Merge one source layer into the store.
    pub(crate) fn apply(&mut self, layer: &OverlayLayer<PreConfigOverlay>) {
        let rank = layer.rank();
        let overlay = layer.overlay();
        write_fields!(self, overlay, rank;
            allocator,
            coerce_c_locale,
            coerce_c_locale_warn,
            utf8_mode,
            isolated,
            use_environment,
            dev_mode,
            legacy_windows_fs_encoding,
        );
    }
}
