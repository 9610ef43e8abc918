//! Process-wide sequencer behind the free-function host API.
//!
//! The instance lives in a `parking_lot::Mutex`. Calls never block: a call
//! made while another one holds the lock (for example from inside the
//! runtime entry point) is reported as an internal error.

use std::sync::LazyLock;

use parking_lot::Mutex;

use crate::config::ConfigOverlay;
use crate::preconfig::PreConfigOverlay;
use crate::{BootError, BootResult, Outcome, RawArg};

use super::{BootState, Bootstrap};

static BOOTSTRAP: LazyLock<Mutex<Bootstrap>> = LazyLock::new(|| Mutex::new(Bootstrap::new()));

/// Run `f` against the process-wide sequencer.
///
/// # Errors
///
/// Returns an internal error when the sequencer is already in use, which
/// happens when a host API call is made re-entrantly.
pub fn with_process_bootstrap<T>(
    operation: &'static str,
    f: impl FnOnce(&mut Bootstrap) -> T,
) -> BootResult<T> {
    let Some(mut bootstrap) = BOOTSTRAP.try_lock() else {
        return Err(BootError::internal(
            operation,
            "bootstrap re-entered while another call is in progress",
        ));
    };
    Ok(f(&mut bootstrap))
}

/// Replace the process-wide sequencer, for hosts that need custom
/// collaborators.
///
/// Only allowed between cycles: before the first step, after the runtime
/// returned, or after a failure.
pub fn install(bootstrap: Bootstrap) -> Outcome {
    let result = with_process_bootstrap("install", |current| match current.state() {
        BootState::Unstarted | BootState::Finalized | BootState::Failed => {
            *current = bootstrap;
            Ok(())
        }
        state => Err(BootError::InvalidState {
            operation: "install",
            state: state.as_str(),
        }),
    });
    Outcome::from(result.and_then(|installed| installed))
}

/// [`Bootstrap::pre_initialize`] on the process-wide sequencer.
pub fn pre_initialize(explicit: Option<PreConfigOverlay>) -> Outcome {
    with_process_bootstrap("pre_initialize", |bootstrap| bootstrap.pre_initialize(explicit))
        .unwrap_or_else(Outcome::from)
}

/// [`Bootstrap::pre_initialize_from_args`] on the process-wide sequencer.
pub fn pre_initialize_from_args(explicit: Option<PreConfigOverlay>, args: &[RawArg]) -> Outcome {
    with_process_bootstrap("pre_initialize", |bootstrap| {
        bootstrap.pre_initialize_from_args(explicit, args)
    })
    .unwrap_or_else(Outcome::from)
}

/// [`Bootstrap::initialize_from_config`] on the process-wide sequencer.
pub fn initialize_from_config(explicit: Option<ConfigOverlay>) -> Outcome {
    with_process_bootstrap("initialize", |bootstrap| {
        bootstrap.initialize_from_config(explicit)
    })
    .unwrap_or_else(Outcome::from)
}

/// [`Bootstrap::initialize_from_args`] on the process-wide sequencer.
pub fn initialize_from_args(explicit: Option<ConfigOverlay>, args: &[RawArg]) -> Outcome {
    with_process_bootstrap("initialize", |bootstrap| {
        bootstrap.initialize_from_args(explicit, args)
    })
    .unwrap_or_else(Outcome::from)
}

/// [`Bootstrap::run_main`] on the process-wide sequencer.
///
/// Returns the runtime's exit status. Hosts that want the conventional
/// process exit pass a failure to [`crate::exit_on_error`].
///
/// # Errors
///
/// Returns [`BootError::InvalidState`] unless the configuration has been
/// resolved, and an internal error when no runtime is installed or the
/// call is re-entrant.
pub fn run_main() -> BootResult<i32> {
    with_process_bootstrap("run_main", Bootstrap::run_main)?
}

/// Return the process-wide sequencer to [`BootState::Unstarted`].
pub fn reset() -> Outcome {
    Outcome::from(with_process_bootstrap("reset", Bootstrap::reset))
}
