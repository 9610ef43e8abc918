//! Command-line handling.
//!
//! The raw command line is read twice: once as bytes by the pre-configuration
//! prescan, and once as decoded text by an [`ArgvParser`] that produces the
//! command-line overlay of the configuration.

mod cli;
mod prescan;
mod scan;

use clap::Parser;

use crate::config::ConfigOverlay;
use crate::{BootError, BootResult, is_display_request};

use cli::CommandLine;
use scan::scan;

pub(crate) use prescan::{apply_pre_xoption, prescan};

/// Exit status for malformed command lines.
pub const USAGE_ERROR_STATUS: i32 = 2;

/// Parses decoded arguments into a configuration overlay.
pub trait ArgvParser {
    /// Parse `args`, whose first element is the program name.
    ///
    /// # Errors
    ///
    /// Returns [`BootError::Exit`] after rendering help, the version or a
    /// usage error, and a user error for input the parser cannot represent.
    fn parse(&self, args: &[String]) -> BootResult<ConfigOverlay>;
}

/// Default [`ArgvParser`] implementing the runtime's option grammar with
/// `clap`.
///
/// ```rust
/// use boot_config::{ArgvParser, ClapArgvParser};
///
/// let args: Vec<String> = ["python", "-v", "-m", "http.server", "8000"]
///     .map(String::from)
///     .into();
/// let overlay = ClapArgvParser.parse(&args)?;
/// assert_eq!(overlay.verbose, Some(1));
/// assert_eq!(overlay.run_module.as_deref(), Some("http.server"));
/// # Ok::<(), boot_config::BootError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ClapArgvParser;

impl ArgvParser for ClapArgvParser {
    fn parse(&self, args: &[String]) -> BootResult<ConfigOverlay> {
        let end = scan(args).end;
        let Some((options, program_args)) = args.split_at_checked(end) else {
            return Err(BootError::internal(
                "argv",
                "option prefix extends past the command line",
            ));
        };
        let command_line = CommandLine::try_parse_from(options).map_err(exit_for)?;
        Ok(command_line.into_overlay(args, program_args))
    }
}

/// Render a `clap` error and turn it into an exit request.
fn exit_for(err: clap::Error) -> BootError {
    let status = if is_display_request(&err) {
        0
    } else {
        USAGE_ERROR_STATUS
    };
    if let Err(io_err) = err.print() {
        tracing::error!(error = %io_err, "failed to print command-line diagnostic");
    }
    BootError::exit(status)
}

#[cfg(test)]
mod tests;
