//! Configuration: the full field set, resolved once decoding is possible.

mod directive;
mod env_vars;
mod frozen;
mod overlay;
mod resolver;
pub(crate) mod rules;
pub(crate) mod store;
mod types;
mod xoptions;

pub use frozen::FrozenConfig;
pub use overlay::ConfigOverlay;
pub use resolver::{ConfigSources, resolve_config};
pub use types::{Directive, HashPycsMode, RunMode};

pub(crate) use resolver::build_store;
