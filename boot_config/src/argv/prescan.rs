//! Pre-configuration view of the raw command line.
//!
//! Runs before any decoder exists, so it inspects bytes only and recognises
//! just the options that influence the pre-configuration.

use crate::preconfig::{PreConfigOverlay, Utf8Mode};
use crate::{BootError, BootResult, RawArg};

use super::scan::{Token, scan};

/// Extract `-I`, `-E`, `-X dev` and `-X utf8[=0|1]` from `args`.
///
/// Unknown options are ignored and scanning stops where option processing
/// ends.
///
/// # Errors
///
/// Returns a user error for `-X utf8=` with a value other than `0` or `1`.
pub(crate) fn prescan(args: &[RawArg]) -> BootResult<PreConfigOverlay> {
    let mut overlay = PreConfigOverlay::default();
    for token in scan(args).tokens {
        match token {
            Token::Flag(b'I') => overlay.isolated = Some(true),
            Token::Flag(b'E') => overlay.use_environment = Some(false),
            Token::Valued(b'X', Some(option)) => apply_pre_xoption(&mut overlay, option)?,
            _ => {}
        }
    }
    Ok(overlay)
}

/// Record the pre-configuration effect of one `-X` option.
pub(crate) fn apply_pre_xoption(overlay: &mut PreConfigOverlay, option: &[u8]) -> BootResult<()> {
    match option {
        b"dev" => overlay.dev_mode = Some(true),
        b"utf8" | b"utf8=1" => overlay.utf8_mode = Some(Utf8Mode::On),
        b"utf8=0" => overlay.utf8_mode = Some(Utf8Mode::Off),
        _ if option.starts_with(b"utf8=") => {
            return Err(BootError::user(
                "preconfig",
                "invalid -X utf8 option value",
            ));
        }
        _ => {}
    }
    Ok(())
}
