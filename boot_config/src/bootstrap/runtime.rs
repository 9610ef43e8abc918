//! Runtime entry point invoked once configuration is final.

use crate::config::FrozenConfig;

/// The interpreter proper. Receives the frozen configuration and returns the
/// process exit status.
pub trait Runtime {
    /// Execute according to [`FrozenConfig::run_mode`].
    fn run(&mut self, config: &FrozenConfig) -> i32;
}

impl<F> Runtime for F
where
    F: FnMut(&FrozenConfig) -> i32,
{
    fn run(&mut self, config: &FrozenConfig) -> i32 {
        self(config)
    }
}
