//! Configuration-file overlay.
//!
//! Files are TOML documents whose keys are [`crate::ConfigOverlay`] fields.
//! Several files may be layered; later files win field by field.

mod loader;

pub use loader::{ConfigFileLoader, TomlFileLoader};

#[cfg(test)]
mod tests;
