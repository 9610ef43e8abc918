//! Rank-aware storage for a single configurable field.

use std::fmt;

use super::SourceRank;

/// Ignored writes kept per slot; later ones are only logged.
const MAX_IGNORED_WRITES: usize = 8;

/// Write rejected because the slot already held a higher-ranked value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgnoredWrite {
    /// Rank of the rejected write.
    pub rank: SourceRank,
    /// Rank held by the slot at the time.
    pub held: SourceRank,
    /// Debug rendering of the rejected value.
    pub value: String,
}

/// One configurable field.
///
/// The layered value is the highest-ranked value ever written. Derived rules
/// may additionally install an override through [`ValueSlot::derive`]; the
/// override is what [`ValueSlot::get`] returns, while [`ValueSlot::layered`]
/// keeps reporting what the sources said.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueSlot<T> {
    value: T,
    rank: SourceRank,
    derived: Option<T>,
    ignored: Vec<IgnoredWrite>,
}

impl<T: Default> Default for ValueSlot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> ValueSlot<T> {
    /// Create a slot holding a compiled default.
    #[must_use]
    pub const fn new(default: T) -> Self {
        Self {
            value: default,
            rank: SourceRank::Default,
            derived: None,
            ignored: Vec::new(),
        }
    }

    /// Create a slot that already holds `value` at `rank`.
    #[must_use]
    pub const fn with_rank(value: T, rank: SourceRank) -> Self {
        Self {
            value,
            rank,
            derived: None,
            ignored: Vec::new(),
        }
    }

    /// Effective value: the derived override if present, else the layered
    /// value.
    #[must_use]
    pub fn get(&self) -> &T {
        self.derived.as_ref().unwrap_or(&self.value)
    }

    /// Highest-ranked value written by a source, ignoring derived overrides.
    #[must_use]
    pub const fn layered(&self) -> &T {
        &self.value
    }

    /// Rank of the layered value.
    #[must_use]
    pub const fn rank(&self) -> SourceRank {
        self.rank
    }

    /// Returns `true` when a source at `rank` or above wrote the value.
    #[must_use]
    pub fn is_pinned_at(&self, rank: SourceRank) -> bool {
        self.rank >= rank
    }

    /// Returns `true` when any source above the compiled default wrote the
    /// value.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.rank > SourceRank::Default
    }

    /// Writes rejected because of rank, oldest first. Only the first few
    /// are kept.
    #[must_use]
    pub fn ignored_writes(&self) -> &[IgnoredWrite] {
        &self.ignored
    }
}

impl<T: fmt::Debug + PartialEq> ValueSlot<T> {
    /// Write `value` at `rank`. Returns `false`, and records the write for
    /// diagnostics, when the slot already holds a higher-ranked value.
    pub fn set(&mut self, value: T, rank: SourceRank) -> bool {
        if rank < self.rank {
            tracing::debug!(
                %rank,
                held = %self.rank,
                ?value,
                "ignoring lower-ranked write"
            );
            if self.ignored.len() < MAX_IGNORED_WRITES {
                self.ignored.push(IgnoredWrite {
                    rank,
                    held: self.rank,
                    value: format!("{value:?}"),
                });
            }
            return false;
        }
        self.value = value;
        self.rank = rank;
        true
    }

    /// Install a derived override. Returns `true` when the effective value
    /// changed.
    pub fn derive(&mut self, value: T) -> bool {
        if self.get() == &value {
            return false;
        }
        self.derived = Some(value);
        true
    }
}
