//! Partial pre-configuration contributed by one source.

use serde::{Deserialize, Serialize};

use super::{Allocator, CoerceLocale, Utf8Mode};

/// Pre-configuration fields a source may set. `None` leaves the field to
/// lower-ranked sources.
///
/// ```rust
/// use boot_config::{PreConfigOverlay, Utf8Mode};
///
/// let explicit = PreConfigOverlay {
///     utf8_mode: Some(Utf8Mode::On),
///     ..PreConfigOverlay::default()
/// };
/// assert!(explicit.allocator.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreConfigOverlay {
    /// Memory allocator.
    pub allocator: Option<Allocator>,
    /// Locale coercion mode.
    pub coerce_c_locale: Option<CoerceLocale>,
    /// Warn when the locale is coerced.
    pub coerce_c_locale_warn: Option<bool>,
    /// UTF-8 mode request.
    pub utf8_mode: Option<Utf8Mode>,
    /// Isolated mode.
    pub isolated: Option<bool>,
    /// Whether environment variables are consulted.
    pub use_environment: Option<bool>,
    /// Development mode.
    pub dev_mode: Option<bool>,
    /// Legacy Windows filesystem encoding.
    pub legacy_windows_fs_encoding: Option<bool>,
}
