//! Layered value store primitives.
//!
//! Every configurable field is a [`ValueSlot`] that remembers the
//! [`SourceRank`] of the value it holds. Sources are merged as overlays
//! through a [`LayerComposer`]; because a slot only accepts writes at or
//! above its current rank, the merged result does not depend on the order in
//! which overlays are applied.
//!
//! ```rust
//! use boot_config::layer::{SourceRank, ValueSlot};
//!
//! let mut verbose = ValueSlot::new(0_u8);
//! assert!(verbose.set(2, SourceRank::CommandLine));
//! assert!(!verbose.set(1, SourceRank::Environment));
//! assert_eq!(*verbose.get(), 2);
//! assert_eq!(verbose.ignored_writes().len(), 1);
//! ```

mod composer;
mod rank;
mod slot;

pub use composer::{LayerComposer, OverlayLayer};
pub use rank::SourceRank;
pub use slot::{IgnoredWrite, ValueSlot};

#[cfg(test)]
mod tests;
