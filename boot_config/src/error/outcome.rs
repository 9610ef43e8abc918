//! Host-facing tagged outcome of a bootstrap step.

use super::{BootError, BootResult};

/// Classification of a failed [`Outcome`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Allocation failure; never attributable to configuration.
    NoMemory,
    /// Engine invariant violated or lifecycle contract broken by the host.
    Internal,
    /// Malformed or contradictory host-supplied configuration.
    User,
}

/// Result of a host API call.
///
/// Exactly one variant is active. `Error` and `Exit` are terminal for the
/// current bootstrap attempt; the host decides what to do with them, usually
/// by passing them to [`crate::exit_on_error`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "a failed outcome must be handled before the runtime is used"]
pub enum Outcome {
    /// The step completed.
    Ok,
    /// The step failed.
    Error {
        /// How the failure should be reported.
        kind: ErrorKind,
        /// Name of the step or source that produced the failure.
        prefix: String,
        /// Description of the failure.
        message: String,
    },
    /// A collaborator asked for the process to exit with `status`.
    Exit {
        /// Process exit status.
        status: i32,
    },
}

impl Outcome {
    /// Returns `true` for [`Outcome::Ok`].
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Returns `true` for [`Outcome::Error`].
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns `true` for [`Outcome::Exit`].
    #[must_use]
    pub const fn is_exit(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }

    /// Returns `true` when the outcome is an error caused by host input.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Error {
                kind: ErrorKind::User,
                ..
            }
        )
    }

    /// Convert the outcome back into a [`BootResult`] for `?` propagation.
    ///
    /// # Errors
    ///
    /// Returns the [`BootError`] equivalent of an `Error` or `Exit` outcome.
    pub fn into_result(self) -> BootResult<()> {
        match self {
            Self::Ok => Ok(()),
            Self::Exit { status } => Err(BootError::exit(status)),
            Self::Error { kind, prefix, message } => Err(match kind {
                ErrorKind::NoMemory => BootError::NoMemory,
                ErrorKind::Internal => BootError::internal(prefix, message),
                ErrorKind::User => BootError::user(prefix, message),
            }),
        }
    }
}

impl From<BootError> for Outcome {
    fn from(err: BootError) -> Self {
        match err {
            BootError::NoMemory => Self::Error {
                kind: ErrorKind::NoMemory,
                prefix: String::from("alloc"),
                message: err.to_string(),
            },
            BootError::Internal { prefix, message } => Self::Error {
                kind: ErrorKind::Internal,
                prefix,
                message,
            },
            BootError::InvalidState { operation, state } => Self::Error {
                kind: ErrorKind::Internal,
                prefix: operation.to_owned(),
                message: format!("not allowed in state {state}"),
            },
            BootError::User { prefix, message } => Self::Error {
                kind: ErrorKind::User,
                prefix,
                message,
            },
            BootError::Exit { status } => Self::Exit { status },
        }
    }
}

impl From<BootResult<()>> for Outcome {
    fn from(result: BootResult<()>) -> Self {
        result.map_or_else(Self::from, |()| Self::Ok)
    }
}
