//! Test helpers shared across the boot-config workspace.
//!
//! Bootstrap resolution reads the process environment and locale, so tests
//! that exercise the process-backed collaborators need serialised, restorable
//! environment mutation. [`env`] provides it.

pub mod env;
