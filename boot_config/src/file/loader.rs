//! TOML loader built on `figment`.

use std::io;

use camino::Utf8PathBuf;
use figment::Figment;
use figment::providers::{Format, Toml};

use crate::config::ConfigOverlay;
use crate::{BootError, BootResult, BootResultExt};

const PREFIX: &str = "config_file";

/// Produces the configuration-file overlay.
pub trait ConfigFileLoader {
    /// Load and merge `paths`; later paths take precedence.
    ///
    /// # Errors
    ///
    /// Returns a user error when a file cannot be read or parsed, or holds
    /// keys that are not configuration fields.
    fn load(&self, paths: &[Utf8PathBuf]) -> BootResult<ConfigOverlay>;
}

/// Default [`ConfigFileLoader`] reading TOML files. Missing files are skipped.
///
/// ```rust,no_run
/// use boot_config::{ConfigFileLoader, TomlFileLoader};
/// use camino::Utf8PathBuf;
///
/// let overlay = TomlFileLoader.load(&[Utf8PathBuf::from("/etc/runtime.toml")])?;
/// println!("verbose = {:?}", overlay.verbose);
/// # Ok::<(), boot_config::BootError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TomlFileLoader;

impl ConfigFileLoader for TomlFileLoader {
    fn load(&self, paths: &[Utf8PathBuf]) -> BootResult<ConfigOverlay> {
        let mut figment = Figment::new();
        for path in paths {
            let data = match std::fs::read_to_string(path) {
                Ok(data) => data,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!(%path, "configuration file not found; skipping");
                    continue;
                }
                Err(err) => return Err(BootError::user(PREFIX, format!("{path}: {err}"))),
            };
            // Validate first so parse failures name the file.
            toml::from_str::<toml::Value>(&data).user_context(PREFIX, path)?;
            tracing::debug!(%path, "loaded configuration file");
            figment = figment.merge(Toml::string(&data));
        }
        figment.extract().user_context(PREFIX, "invalid configuration")
    }
}
