//! Environment accessor used by both resolvers.

use std::collections::BTreeMap;

use crate::RawArg;

/// Read-only view of environment variables.
pub trait Environment {
    /// Raw value of `name`, if set.
    fn get(&self, name: &str) -> Option<RawArg>;

    /// Raw value of `name` when set to a non-empty value. Empty variables are
    /// treated as unset.
    fn get_nonempty(&self, name: &str) -> Option<RawArg> {
        self.get(name).filter(|value| !value.is_empty())
    }
}

/// Reads the real process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn get(&self, name: &str) -> Option<RawArg> {
        std::env::var_os(name).map(RawArg::from)
    }
}

/// In-memory environment for hosts that supply their own variables.
///
/// ```rust
/// use boot_config::{Environment, MapEnvironment};
///
/// let env = MapEnvironment::new()
///     .with("PYTHONUTF8", "1")
///     .with("PYTHONWARNINGS", "");
/// assert!(env.get("PYTHONUTF8").is_some());
/// assert!(env.get_nonempty("PYTHONWARNINGS").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MapEnvironment {
    vars: BTreeMap<String, RawArg>,
}

impl MapEnvironment {
    /// Create an empty environment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Add or replace a variable.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawArg>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a variable in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawArg>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnvironment
where
    K: Into<String>,
    V: Into<RawArg>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl Environment for MapEnvironment {
    fn get(&self, name: &str) -> Option<RawArg> {
        self.vars.get(name).cloned()
    }
}

/// Interpret an integer level flag such as `PYTHONVERBOSE`.
///
/// A non-negative integer is used as the level (saturating at `u8::MAX`);
/// any other non-empty value counts as level 1.
pub(crate) fn level_flag(value: &str) -> u8 {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|level| *level >= 0)
        .map_or(1, |level| u8::try_from(level).unwrap_or(u8::MAX))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use test_helpers::env;

    use super::*;

    #[rstest]
    #[case("1", 1)]
    #[case("3", 3)]
    #[case("0", 0)]
    #[case("yes", 1)]
    #[case("-2", 1)]
    #[case("9999", u8::MAX)]
    fn level_flags_follow_integer_rules(#[case] raw: &str, #[case] expected: u8) {
        assert_eq!(level_flag(raw), expected);
    }

    #[test]
    fn process_environment_reads_real_variables() {
        let _guard = env::set_var("BOOT_CONFIG_ENV_PROBE", "present");
        let value = ProcessEnvironment.get("BOOT_CONFIG_ENV_PROBE");
        assert_eq!(value.as_ref().and_then(RawArg::as_ascii), Some("present"));
    }

    #[test]
    fn empty_values_are_unset_for_nonempty_lookups() {
        let _guard = env::set_var("BOOT_CONFIG_ENV_EMPTY", "");
        assert!(ProcessEnvironment.get("BOOT_CONFIG_ENV_EMPTY").is_some());
        assert!(ProcessEnvironment.get_nonempty("BOOT_CONFIG_ENV_EMPTY").is_none());
    }

    #[test]
    fn map_environment_collects_pairs() {
        let env: MapEnvironment = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(env.get("B").as_ref().and_then(RawArg::as_ascii), Some("2"));
        assert!(env.get("C").is_none());
    }
}
