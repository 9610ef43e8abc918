//! Serialised, restorable environment mutation for tests.
//!
//! Every mutation runs under one process-wide re-entrant lock and returns an
//! [`EnvVarGuard`] that restores the previous value when dropped. Guards for
//! the same key restore in LIFO order. An [`EnvScope`] keeps the lock for its
//! whole lifetime, so a test reading the environment through the bootstrap
//! does not observe another test's writes.
//!
//! # Examples
//!
//! ```
//! use boot_config_test_helpers::env;
//!
//! let _scope = env::EnvScope::new_with(|lock| {
//!     vec![lock.set_var("PYTHONVERBOSE", "2"), lock.remove_var("PYTHONHOME")]
//! });
//! assert_eq!(std::env::var("PYTHONVERBOSE").as_deref(), Ok("2"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Locale variables consulted when probing `LC_CTYPE`.
pub const LOCALE_VARIABLES: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

/// Prefix shared by every runtime-configuration variable.
pub const RUNTIME_PREFIX: &str = "PYTHON";

/// Guard restoring one variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: `ENV_MUTEX` is held.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: `ENV_MUTEX` is held.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// Holds the environment lock; mutations made through it are serialised.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvVarLock {
    /// Set `key` to `value`.
    pub fn set_var(&self, key: impl Into<String>, value: impl AsRef<OsStr>) -> EnvVarGuard {
        let key = key.into();
        let original = env::var_os(&key);
        // SAFETY: `self` holds `ENV_MUTEX`.
        unsafe { env::set_var(&key, value) };
        EnvVarGuard { key, original }
    }

    /// Remove `key`.
    pub fn remove_var(&self, key: impl Into<String>) -> EnvVarGuard {
        let key = key.into();
        let original = env::var_os(&key);
        // SAFETY: `self` holds `ENV_MUTEX`.
        unsafe { env::remove_var(&key) };
        EnvVarGuard { key, original }
    }

    /// Remove every runtime-configuration variable and pin the locale
    /// variables to `locale`.
    ///
    /// Tests that drive the process-backed environment start from this so
    /// variables exported by the developer's shell cannot leak in.
    pub fn isolate_runtime(&self, locale: &str) -> Vec<EnvVarGuard> {
        let runtime_keys: Vec<String> = env::vars_os()
            .filter_map(|(key, _)| key.into_string().ok())
            .filter(|key| key.starts_with(RUNTIME_PREFIX))
            .collect();
        let mut guards: Vec<EnvVarGuard> = runtime_keys
            .into_iter()
            .map(|key| self.remove_var(key))
            .collect();
        guards.push(self.remove_var("LC_ALL"));
        guards.push(self.remove_var("LANG"));
        guards.push(self.set_var("LC_CTYPE", locale));
        guards
    }
}

/// Acquire the environment lock until the returned value is dropped.
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        _guard: ENV_MUTEX.lock(),
    }
}

/// Set `key` to `value` under the lock; the lock is released on return.
pub fn set_var(key: impl Into<String>, value: impl AsRef<OsStr>) -> EnvVarGuard {
    lock().set_var(key, value)
}

/// Remove `key` under the lock; the lock is released on return.
pub fn remove_var(key: impl Into<String>) -> EnvVarGuard {
    lock().remove_var(key)
}

/// Lock held together with the guards created under it.
///
/// Guards restore before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: EnvVarLock,
}

impl EnvScope {
    /// Run `builder` under the lock and keep the lock with its guards.
    pub fn new_with<F>(builder: F) -> Self
    where
        F: FnOnce(&EnvVarLock) -> Vec<EnvVarGuard>,
    {
        let held = lock();
        let guards = builder(&held);
        Self {
            guards,
            _lock: held,
        }
    }

    /// Scope with every runtime variable removed, the locale pinned to
    /// `locale` and `vars` set on top.
    ///
    /// ```
    /// use boot_config_test_helpers::env;
    ///
    /// let _scope = env::EnvScope::runtime("C.UTF-8", &[("PYTHONOPTIMIZE", "1")]);
    /// assert_eq!(std::env::var("LC_CTYPE").as_deref(), Ok("C.UTF-8"));
    /// assert_eq!(std::env::var("PYTHONOPTIMIZE").as_deref(), Ok("1"));
    /// ```
    pub fn runtime(locale: &str, vars: &[(&str, &str)]) -> Self {
        Self::new_with(|lock| {
            let mut guards = lock.isolate_runtime(locale);
            guards.extend(vars.iter().map(|(key, value)| lock.set_var(*key, value)));
            guards
        })
    }

    /// Number of guards held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.guards.len()
    }

    /// Returns `true` when the scope holds no guards.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Restore in reverse creation order while the lock is still held.
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

#[cfg(test)]
mod tests;
