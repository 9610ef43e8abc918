//! Bootstrap sequencing: pre-initialise, resolve, run, exactly once per
//! cycle.

mod global;
mod hooks;
mod runtime;
mod sequencer;
mod state;

pub use global::{
    initialize_from_args, initialize_from_config, install, pre_initialize,
    pre_initialize_from_args, reset, run_main, with_process_bootstrap,
};
pub use hooks::{GlobalProcessState, NoopHooks, ProcessHooks, ProcessState, process_state};
pub use runtime::Runtime;
pub use sequencer::Bootstrap;
pub use state::BootState;
