//! Environment variables read during pre-configuration.
//!
//! Values are inspected as ASCII only: no decoder exists yet at this point.

use crate::env::{Environment, level_flag};
use crate::{BootError, BootResult, RawArg};

use super::{Allocator, CoerceLocale, PreConfigOverlay, UnknownAllocator, Utf8Mode};

const PREFIX: &str = "preconfig";

/// Build the environment overlay for the pre-configuration.
pub(crate) fn read_environment(env: &dyn Environment) -> BootResult<PreConfigOverlay> {
    let mut overlay = PreConfigOverlay::default();
    if let Some(raw) = env.get_nonempty("PYTHONMALLOC") {
        overlay.allocator = Some(parse_allocator(&raw)?);
    }
    if let Some(raw) = env.get_nonempty("PYTHONCOERCECLOCALE") {
        match raw.as_ascii() {
            Some("0") => overlay.coerce_c_locale = Some(CoerceLocale::Off),
            Some("warn") => overlay.coerce_c_locale_warn = Some(true),
            _ => overlay.coerce_c_locale = Some(CoerceLocale::Force),
        }
    }
    if let Some(raw) = env.get_nonempty("PYTHONUTF8") {
        overlay.utf8_mode = Some(match raw.as_ascii() {
            Some("1") => Utf8Mode::On,
            Some("0") => Utf8Mode::Off,
            _ => {
                return Err(BootError::user(
                    PREFIX,
                    "invalid PYTHONUTF8 environment variable value",
                ));
            }
        });
    }
    if env.get_nonempty("PYTHONDEVMODE").is_some() {
        overlay.dev_mode = Some(true);
    }
    if cfg!(windows)
        && let Some(raw) = env.get_nonempty("PYTHONLEGACYWINDOWSFSENCODING")
    {
        let level = raw.as_ascii().map_or(1, level_flag);
        overlay.legacy_windows_fs_encoding = Some(level > 0);
    }
    Ok(overlay)
}

fn parse_allocator(raw: &RawArg) -> BootResult<Allocator> {
    let name = raw
        .as_ascii()
        .ok_or_else(|| BootError::user(PREFIX, "PYTHONMALLOC: unknown allocator"))?;
    name.parse()
        .map_err(|err: UnknownAllocator| BootError::user(PREFIX, format!("PYTHONMALLOC: {err}")))
}
