//! Error channel shared by every resolution step.
//!
//! Steps inside the crate return [`BootResult`] and propagate with `?`. The
//! host-facing API converts the final result into an [`Outcome`] so embedders
//! can match on a closed set of variants.

mod constructors;
mod helpers;
mod outcome;
mod types;

pub use helpers::{exit_on_error, is_display_request};
pub use outcome::{ErrorKind, Outcome};
pub use types::BootError;

/// Result alias used by resolvers and collaborators.
pub type BootResult<T> = Result<T, BootError>;

#[cfg(test)]
mod tests;
