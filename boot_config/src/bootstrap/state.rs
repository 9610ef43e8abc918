//! Lifecycle states of the bootstrap sequencer.

use std::fmt;

use serde::Serialize;

/// Position of a [`crate::Bootstrap`] in its lifecycle.
///
/// Transitions only move forward, or to [`BootState::Failed`]. A finished
/// cycle (`Finalized`) may start again from `Unstarted`; a failed one needs
/// an explicit [`crate::Bootstrap::reset`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BootState {
    /// Nothing resolved yet.
    #[default]
    Unstarted,
    /// Pre-configuration frozen and process-wide effects applied.
    PreInitialized,
    /// Configuration frozen; ready to run.
    ConfigResolved,
    /// The runtime entry point is executing.
    Running,
    /// The runtime returned; the configuration stays readable.
    Finalized,
    /// A step returned an error or an exit request.
    Failed,
}

impl BootState {
    /// Kebab-case state name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unstarted => "unstarted",
            Self::PreInitialized => "pre-initialized",
            Self::ConfigResolved => "config-resolved",
            Self::Running => "running",
            Self::Finalized => "finalized",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for BootState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
