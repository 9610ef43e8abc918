//! Probing of the active `LC_CTYPE` locale.

/// Locale the `C`/`POSIX` locale is coerced to.
pub const COERCION_TARGET: &str = "C.UTF-8";

/// Reports, and when asked coerces, the locale that governs character
/// classification.
pub trait LocaleProbe {
    /// Name of the active `LC_CTYPE` locale, e.g. `C` or `en_GB.UTF-8`.
    fn ctype(&self) -> String;

    /// Make `target` the `LC_CTYPE` locale of the process. Probes that only
    /// observe a locale leave this as a no-op.
    ///
    /// # Contract
    ///
    /// Implementations may mutate the process environment. Callers must
    /// invoke this while no other thread reads or writes the environment;
    /// the bootstrap calls it once per process, from [`crate::ProcessHooks`],
    /// and hosts embedding it are responsible for starting their threads
    /// afterwards.
    fn coerce(&self, _target: &str) {}
}

/// Resolves `LC_CTYPE` the way the C library does at start-up: `LC_ALL`,
/// then `LC_CTYPE`, then `LANG`, falling back to `C`.
///
/// Locale variables are honoured even when the engine ignores the
/// environment, as they belong to the C library rather than the runtime.
///
/// [`LocaleProbe::coerce`] writes `LC_CTYPE` with [`std::env::set_var`] and
/// inherits that function's single-threaded precondition.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvLocaleProbe;

impl LocaleProbe for EnvLocaleProbe {
    fn ctype(&self) -> String {
        ["LC_ALL", "LC_CTYPE", "LANG"]
            .into_iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.is_empty())
            .unwrap_or_else(|| String::from("C"))
    }

    fn coerce(&self, target: &str) {
        // SAFETY: the caller upholds the `coerce` contract: no other thread
        // touches the environment during this call.
        unsafe { std::env::set_var("LC_CTYPE", target) };
    }
}

/// Probe that always reports the same locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedLocale(String);

impl FixedLocale {
    /// Report `name` as the active locale.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl LocaleProbe for FixedLocale {
    fn ctype(&self) -> String {
        self.0.clone()
    }
}

/// Returns `true` for the `C` and `POSIX` locales.
pub(crate) fn is_legacy_locale(name: &str) -> bool {
    matches!(name, "C" | "POSIX")
}

/// Codeset named by a locale: the part after `.` and before `@`.
///
/// `C`/`POSIX` report ASCII; a locale without an explicit codeset is assumed
/// to be UTF-8.
pub(crate) fn codeset(name: &str) -> &str {
    if is_legacy_locale(name) {
        return "ANSI_X3.4-1968";
    }
    name.split_once('.').map_or("UTF-8", |(_, rest)| {
        rest.split_once('@').map_or(rest, |(codeset, _)| codeset)
    })
}
