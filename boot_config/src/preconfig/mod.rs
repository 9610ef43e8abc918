//! Pre-configuration: the bootstrap-critical fields resolved before any raw
//! byte string can be decoded.

mod env_vars;
mod frozen;
mod locale;
mod overlay;
mod resolver;
pub(crate) mod rules;
pub(crate) mod store;
mod types;

pub use frozen::FrozenPreConfig;
pub use locale::{COERCION_TARGET, EnvLocaleProbe, FixedLocale, LocaleProbe};
pub use overlay::PreConfigOverlay;
pub use resolver::{PreConfigSources, resolve_preconfig};
pub use types::{Allocator, CoerceLocale, UnknownAllocator, Utf8Mode};

#[cfg(test)]
mod tests;
