//! Extensions for mapping collaborator errors to `BootResult` concisely.
//!
//! Collaborators surface foreign error types (`figment::Error`,
//! `toml::de::Error`, `std::io::Error`). They are all caused by host input,
//! so they become user errors carrying the prefix of the reporting step.
//!
//! ```
//! use boot_config::{BootResult, BootResultExt};
//!
//! fn level(raw: &str) -> BootResult<u8> {
//!     raw.parse::<u8>().user_context("config", "verbose")
//! }
//!
//! let err = level("loud").expect_err("not a number");
//! assert_eq!(err.to_string(), "config: verbose: invalid digit found in string");
//! ```

use std::fmt;

use crate::{BootError, BootResult};

/// Maps any displayable error into a [`BootError::User`].
pub trait BootResultExt<T> {
    /// Convert the error into a user error reading `context: error`.
    ///
    /// # Errors
    ///
    /// Returns the converted error when `self` is `Err`.
    fn user_context(self, prefix: &str, context: impl fmt::Display) -> BootResult<T>;
}

impl<T, E> BootResultExt<T> for Result<T, E>
where
    E: fmt::Display,
{
    fn user_context(self, prefix: &str, context: impl fmt::Display) -> BootResult<T> {
        self.map_err(|err| BootError::user(prefix, format!("{context}: {err}")))
    }
}
