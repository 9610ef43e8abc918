//! Primary error enum for bootstrap resolution flows.

use thiserror::Error;

/// Errors raised while resolving or applying a runtime configuration.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BootError {
    /// An allocation failed while decoding or copying configuration data.
    #[error("memory allocation failed")]
    NoMemory,

    /// An engine invariant was violated.
    #[error("{prefix}: {message}")]
    Internal {
        /// Name of the step that detected the violation.
        prefix: String,
        /// Description of the violated invariant.
        message: String,
    },

    /// A host operation was called in a lifecycle state that does not
    /// permit it.
    #[error("{operation}: not allowed in state {state}")]
    InvalidState {
        /// Name of the rejected operation.
        operation: &'static str,
        /// State the sequencer was in when the operation was attempted.
        state: &'static str,
    },

    /// Malformed or contradictory input supplied by the host.
    #[error("{prefix}: {message}")]
    User {
        /// Name of the source or step that rejected the input.
        prefix: String,
        /// User-facing description of the problem.
        message: String,
    },

    /// A collaborator asked for the process to terminate.
    #[error("exit requested with status {status}")]
    Exit {
        /// Status the process should exit with.
        status: i32,
    },
}
