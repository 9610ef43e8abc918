//! Value types specific to the pre-configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory allocator selected before the runtime allocates anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Allocator {
    /// Build default.
    #[default]
    Default,
    /// Build default with debug hooks.
    Debug,
    /// libc `malloc`.
    Malloc,
    /// libc `malloc` with debug hooks.
    MallocDebug,
    /// Small-object allocator.
    Pymalloc,
    /// Small-object allocator with debug hooks.
    PymallocDebug,
    /// `mimalloc`.
    Mimalloc,
    /// `mimalloc` with debug hooks.
    MimallocDebug,
}

impl Allocator {
    /// Every allocator in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Default,
        Self::Debug,
        Self::Malloc,
        Self::MallocDebug,
        Self::Pymalloc,
        Self::PymallocDebug,
        Self::Mimalloc,
        Self::MimallocDebug,
    ];

    /// Name accepted by `PYTHONMALLOC`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Debug => "debug",
            Self::Malloc => "malloc",
            Self::MallocDebug => "malloc_debug",
            Self::Pymalloc => "pymalloc",
            Self::PymallocDebug => "pymalloc_debug",
            Self::Mimalloc => "mimalloc",
            Self::MimallocDebug => "mimalloc_debug",
        }
    }

    /// Returns `true` when the allocator installs debug hooks.
    #[must_use]
    pub const fn has_debug_hooks(self) -> bool {
        matches!(
            self,
            Self::Debug | Self::MallocDebug | Self::PymallocDebug | Self::MimallocDebug
        )
    }
}

impl fmt::Display for Allocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allocator name that matches no known allocator.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown allocator {0:?}")]
pub struct UnknownAllocator(pub String);

impl FromStr for Allocator {
    type Err = UnknownAllocator;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|allocator| allocator.as_str() == name)
            .ok_or_else(|| UnknownAllocator(name.to_owned()))
    }
}

/// How the `C`/`POSIX` locale is handled at start-up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoerceLocale {
    /// Never coerce.
    Off,
    /// Coerce only when probing finds the `C`/`POSIX` locale.
    #[default]
    Probe,
    /// Always coerce.
    Force,
}

/// Requested UTF-8 mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Utf8Mode {
    /// UTF-8 mode disabled.
    Off,
    /// UTF-8 mode enabled.
    On,
    /// Enabled when the locale is `C`/`POSIX`.
    #[default]
    Auto,
}

impl From<bool> for Utf8Mode {
    fn from(enabled: bool) -> Self {
        if enabled { Self::On } else { Self::Off }
    }
}
