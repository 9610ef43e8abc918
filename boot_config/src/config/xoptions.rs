//! Interpretation of `-X name[=value]` options.
//!
//! Options are kept verbatim in `xoptions`; the recognised ones additionally
//! set configuration fields at the rank of the source that supplied them.
//! Unknown names are carried through untouched.

use camino::Utf8PathBuf;

use crate::{BootError, BootResult, StringList};

use super::ConfigOverlay;

const PREFIX: &str = "config";

/// Fields implied by a list of `-X` options.
pub(crate) fn implied_fields(xoptions: &StringList) -> BootResult<ConfigOverlay> {
    let mut overlay = ConfigOverlay::default();
    for option in xoptions.iter() {
        let (name, value) = option
            .split_once('=')
            .map_or((option, None), |(name, value)| (name, Some(value)));
        match name {
            "dev" => overlay.dev_mode = Some(true),
            "faulthandler" => overlay.faulthandler = Some(true),
            "importtime" => overlay.import_time = Some(true),
            "tracemalloc" => overlay.tracemalloc = Some(tracemalloc_frames(value)?),
            "pycache_prefix" => {
                if let Some(path) = value.filter(|path| !path.is_empty()) {
                    overlay.pycache_prefix = Some(Utf8PathBuf::from(path));
                }
            }
            "frozen_modules" => overlay.use_frozen_modules = Some(frozen_modules(value)?),
            _ => {}
        }
    }
    Ok(overlay)
}

fn tracemalloc_frames(value: Option<&str>) -> BootResult<u16> {
    value.map_or(Ok(1), |frames| {
        frames.parse().map_err(|_| {
            BootError::user(
                PREFIX,
                "-X tracemalloc=NFRAME: invalid number of frames",
            )
        })
    })
}

fn frozen_modules(value: Option<&str>) -> BootResult<bool> {
    match value {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        _ => Err(BootError::user(
            PREFIX,
            "-X frozen_modules=[on|off]: invalid value",
        )),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn options(items: &[&str]) -> StringList {
        items.iter().copied().collect()
    }

    #[rstest]
    fn recognised_options_set_fields() {
        let overlay = implied_fields(&options(&[
            "dev",
            "importtime",
            "tracemalloc=25",
            "pycache_prefix=/tmp/pyc",
            "frozen_modules=off",
            "something_else=1",
        ]))
        .expect("valid options");
        assert_eq!(overlay.dev_mode, Some(true));
        assert_eq!(overlay.import_time, Some(true));
        assert_eq!(overlay.tracemalloc, Some(25));
        assert_eq!(overlay.pycache_prefix, Some(Utf8PathBuf::from("/tmp/pyc")));
        assert_eq!(overlay.use_frozen_modules, Some(false));
        assert_eq!(overlay.faulthandler, None);
    }

    #[rstest]
    fn bare_tracemalloc_records_one_frame() {
        let overlay = implied_fields(&options(&["tracemalloc"])).expect("valid options");
        assert_eq!(overlay.tracemalloc, Some(1));
    }

    #[rstest]
    #[case("tracemalloc=65536")]
    #[case("tracemalloc=-1")]
    #[case("tracemalloc=many")]
    #[case("frozen_modules=maybe")]
    #[case("frozen_modules")]
    fn malformed_options_are_user_errors(#[case] option: &str) {
        let err = implied_fields(&options(&[option])).expect_err("must be rejected");
        assert!(err.is_user_error());
    }
}
