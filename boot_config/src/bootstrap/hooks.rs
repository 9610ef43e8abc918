//! Process-wide side effects of a frozen pre-configuration.

use parking_lot::RwLock;
use serde::Serialize;

use crate::BootResult;
use crate::codec::TextCodec;
use crate::preconfig::{Allocator, COERCION_TARGET, FrozenPreConfig, LocaleProbe};

/// Applies the effects of a frozen pre-configuration to the process.
pub trait ProcessHooks {
    /// Select the allocator, coerce the locale and fix the text codec.
    ///
    /// # Errors
    ///
    /// Implementations return an error when an effect cannot be applied.
    fn apply(&mut self, pre: &FrozenPreConfig, locale: &dyn LocaleProbe) -> BootResult<()>;
}

/// Process-wide effects recorded by [`GlobalProcessState`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessState {
    /// Allocator selected for the process.
    pub allocator: Allocator,
    /// Codec fixed for raw host input.
    pub filesystem_codec: TextCodec,
    /// UTF-8 mode.
    pub utf8_mode: bool,
    /// Locale `LC_CTYPE` was coerced to, if any.
    pub coerced_locale: Option<&'static str>,
}

static PROCESS_STATE: RwLock<Option<ProcessState>> = RwLock::new(None);

/// Effects applied to this process, if a bootstrap has pre-initialised it.
#[must_use]
pub fn process_state() -> Option<ProcessState> {
    PROCESS_STATE.read().clone()
}

/// Default [`ProcessHooks`]: records the effects in process-wide state and
/// coerces the locale through the [`LocaleProbe`].
///
/// Effects are applied at most once per process; later bootstrap cycles
/// keep the state adopted by the first one.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalProcessState;

impl ProcessHooks for GlobalProcessState {
    fn apply(&mut self, pre: &FrozenPreConfig, locale: &dyn LocaleProbe) -> BootResult<()> {
        let mut state = PROCESS_STATE.write();
        if state.is_some() {
            tracing::debug!("process-wide state already applied; keeping it");
            return Ok(());
        }
        let coerced_locale = pre.coerce_locale.then_some(COERCION_TARGET);
        if let Some(target) = coerced_locale {
            locale.coerce(target);
            if pre.coerce_c_locale_warn {
                tracing::warn!(
                    from = %pre.ctype_locale,
                    to = target,
                    "detected locale \"C\" with ASCII encoding, coercing LC_CTYPE"
                );
            }
        }
        let applied = ProcessState {
            allocator: pre.allocator,
            filesystem_codec: pre.filesystem_codec,
            utf8_mode: pre.utf8_mode,
            coerced_locale,
        };
        tracing::info!(
            allocator = %applied.allocator,
            codec = %applied.filesystem_codec,
            utf8_mode = applied.utf8_mode,
            "process-wide state applied"
        );
        *state = Some(applied);
        Ok(())
    }
}

/// [`ProcessHooks`] that applies nothing, for hosts that manage allocator and
/// locale themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl ProcessHooks for NoopHooks {
    fn apply(&mut self, pre: &FrozenPreConfig, _locale: &dyn LocaleProbe) -> BootResult<()> {
        tracing::debug!(allocator = %pre.allocator, "process-wide effects left to the host");
        Ok(())
    }
}
