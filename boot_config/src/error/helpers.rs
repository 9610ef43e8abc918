//! Helpers for classifying collaborator errors and acting on outcomes.

use std::io::Write;

use clap::{Error as ClapError, error::ErrorKind as ClapErrorKind};

use super::{ErrorKind, Outcome};

/// Returns `true` when a [`clap::Error`] corresponds to `--help` or
/// `--version`.
///
/// Display requests are not failures: the argument parser renders them and
/// reports an exit request with status zero.
#[must_use]
pub fn is_display_request(err: &ClapError) -> bool {
    matches!(
        err.kind(),
        ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion
    )
}

fn report(line: std::fmt::Arguments<'_>) {
    let mut stderr = std::io::stderr().lock();
    if let Err(err) = writeln!(stderr, "{line}") {
        tracing::error!(error = %err, "failed to write bootstrap diagnostic");
    }
}

/// Terminate the process according to a failed `outcome`.
///
/// * `Exit` exits quietly with its status.
/// * A user error prints `prefix: message` and exits with status 1.
/// * Internal and allocation errors print a fatal diagnostic and abort.
///
/// Passing [`Outcome::Ok`] is a contract violation and is treated as an
/// internal error.
pub fn exit_on_error(outcome: Outcome) -> ! {
    match outcome {
        Outcome::Exit { status } => std::process::exit(status),
        Outcome::Error {
            kind: ErrorKind::User,
            prefix,
            message,
        } => {
            report(format_args!("{prefix}: {message}"));
            std::process::exit(1)
        }
        Outcome::Error { prefix, message, .. } => {
            report(format_args!("Fatal error: {prefix}: {message}"));
            std::process::abort()
        }
        Outcome::Ok => {
            report(format_args!(
                "Fatal error: exit_on_error: called with a successful outcome"
            ));
            std::process::abort()
        }
    }
}
