//! Immutable pre-configuration adopted by the process.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::codec::{Decoder, TextCodec};
use crate::layer::{SourceRank, ValueSlot};

use super::locale::{LocaleProbe, codeset, is_legacy_locale};
use super::store::PreConfigStore;
use super::{Allocator, CoerceLocale, Utf8Mode};

/// Layered values the configuration resolver starts from.
///
/// These are the source-level values, before derived rules, so the
/// configuration phase can evaluate its own gates and rules afresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PreSeeds {
    pub(crate) isolated: ValueSlot<bool>,
    pub(crate) use_environment: ValueSlot<bool>,
    pub(crate) dev_mode: ValueSlot<bool>,
}

fn seed(slot: &ValueSlot<bool>) -> ValueSlot<bool> {
    ValueSlot::with_rank(*slot.layered(), slot.rank())
}

/// Fully resolved pre-configuration.
///
/// Produced by [`crate::resolve_preconfig`]; never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrozenPreConfig {
    /// Selected memory allocator.
    pub allocator: Allocator,
    /// Requested locale coercion mode.
    pub coerce_c_locale: CoerceLocale,
    /// Warn when the locale is coerced.
    pub coerce_c_locale_warn: bool,
    /// Resolved UTF-8 mode.
    pub utf8_mode: bool,
    /// Isolated mode.
    pub isolated: bool,
    /// Whether environment variables are consulted.
    pub use_environment: bool,
    /// Development mode.
    pub dev_mode: bool,
    /// Legacy Windows filesystem encoding.
    pub legacy_windows_fs_encoding: bool,
    /// `LC_CTYPE` locale observed when the pre-configuration was frozen.
    pub ctype_locale: String,
    /// Whether the locale is coerced to [`crate::COERCION_TARGET`].
    pub coerce_locale: bool,
    /// Codec used to decode raw arguments and environment values.
    pub filesystem_codec: TextCodec,
    provenance: BTreeMap<&'static str, SourceRank>,
    #[serde(skip)]
    pub(crate) seeds: PreSeeds,
}

impl FrozenPreConfig {
    pub(crate) fn freeze(store: &PreConfigStore, locale: &dyn LocaleProbe) -> Self {
        let ctype_locale = locale.ctype();
        let legacy_locale = is_legacy_locale(&ctype_locale);
        let coerce_c_locale = *store.coerce_c_locale.get();
        let coerce_locale = !cfg!(windows)
            && match coerce_c_locale {
                CoerceLocale::Off => false,
                CoerceLocale::Probe => legacy_locale,
                CoerceLocale::Force => true,
            };
        let utf8_mode = match *store.utf8_mode.get() {
            Utf8Mode::On => true,
            Utf8Mode::Off => false,
            Utf8Mode::Auto => !cfg!(windows) && legacy_locale,
        };
        let filesystem_codec = if utf8_mode || coerce_locale || cfg!(windows) {
            TextCodec::Utf8
        } else {
            TextCodec::from_codeset(codeset(&ctype_locale))
        };
        let provenance = BTreeMap::from([
            ("allocator", store.allocator.rank()),
            ("coerce_c_locale", store.coerce_c_locale.rank()),
            ("coerce_c_locale_warn", store.coerce_c_locale_warn.rank()),
            ("utf8_mode", store.utf8_mode.rank()),
            ("isolated", store.isolated.rank()),
            ("use_environment", store.use_environment.rank()),
            ("dev_mode", store.dev_mode.rank()),
            (
                "legacy_windows_fs_encoding",
                store.legacy_windows_fs_encoding.rank(),
            ),
        ]);
        Self {
            allocator: *store.allocator.get(),
            coerce_c_locale,
            coerce_c_locale_warn: *store.coerce_c_locale_warn.get(),
            utf8_mode,
            isolated: *store.isolated.get(),
            use_environment: *store.use_environment.get(),
            dev_mode: *store.dev_mode.get(),
            legacy_windows_fs_encoding: *store.legacy_windows_fs_encoding.get(),
            ctype_locale,
            coerce_locale,
            filesystem_codec,
            provenance,
            seeds: PreSeeds {
                isolated: seed(&store.isolated),
                use_environment: seed(&store.use_environment),
                dev_mode: seed(&store.dev_mode),
            },
        }
    }

    /// Decoder for raw host input, available only once frozen.
    #[must_use]
    pub const fn decoder(&self) -> Decoder {
        Decoder::new(self.filesystem_codec)
    }

    /// Rank of the source that supplied `field`, if `field` is known.
    #[must_use]
    pub fn rank_of(&self, field: &str) -> Option<SourceRank> {
        self.provenance.get(field).copied()
    }

    /// Returns `true` when `LC_CTYPE` was the `C`/`POSIX` locale.
    #[must_use]
    pub fn legacy_locale(&self) -> bool {
        is_legacy_locale(&self.ctype_locale)
    }
}
