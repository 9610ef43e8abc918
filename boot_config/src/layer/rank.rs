//! Trust ranking of configuration sources.

use std::fmt;

use serde::Serialize;

/// Relative priority of a configuration source. Higher ranks win.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceRank {
    /// Compiled-in default value.
    Default,
    /// Legacy process-global compatibility flag.
    GlobalCompat,
    /// Environment variable.
    Environment,
    /// Configuration file overlay.
    ConfigFile,
    /// Command-line option.
    CommandLine,
    /// Field set explicitly by the embedding host.
    Explicit,
}

impl SourceRank {
    /// Every rank in ascending order.
    pub const ALL: [Self; 6] = [
        Self::Default,
        Self::GlobalCompat,
        Self::Environment,
        Self::ConfigFile,
        Self::CommandLine,
        Self::Explicit,
    ];

    /// Stable identifier used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::GlobalCompat => "global-compat",
            Self::Environment => "environment",
            Self::ConfigFile => "config-file",
            Self::CommandLine => "command-line",
            Self::Explicit => "explicit",
        }
    }
}

impl fmt::Display for SourceRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
