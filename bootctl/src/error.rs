//! Error type for the `bootctl` demo host.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures outside the bootstrap itself; bootstrap outcomes go through
/// `boot_config::exit_on_error`.
#[derive(Debug, Error)]
pub enum BootctlError {
    /// `BOOTCTL_FORMAT` named an unknown format.
    #[error("unknown output format '{0}'; expected 'text' or 'json'")]
    UnknownFormat(String),

    /// A `BOOTCTL_CONFIG` entry was not valid UTF-8.
    #[error("configuration path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// Writing the dump failed.
    #[error("failed to write configuration dump: {0}")]
    Io(#[from] io::Error),

    /// Serialising the dump failed.
    #[error("failed to serialise configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for `bootctl`.
pub type Result<T> = std::result::Result<T, BootctlError>;
