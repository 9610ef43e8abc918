//! Value types used by the configuration.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Validation mode for hash-based bytecode caches.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum HashPycsMode {
    /// Check only caches flagged for checking.
    #[default]
    Default,
    /// Always validate against the source.
    Always,
    /// Never validate.
    Never,
}

/// What the runtime executes once configuration is finalised.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Directive {
    /// Source text passed with `-c`.
    Command(String),
    /// Module name passed with `-m`.
    Module(String),
    /// Script file.
    Filename(Utf8PathBuf),
}

impl Directive {
    /// Name of the directive kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Command(_) => "command",
            Self::Module(_) => "module",
            Self::Filename(_) => "filename",
        }
    }

    /// First program argument a command line carrying this directive
    /// produces.
    pub(crate) fn argv0(&self) -> &str {
        match self {
            Self::Command(_) => "-c",
            Self::Module(_) => "-m",
            Self::Filename(path) => path.as_str(),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(command) => write!(f, "command {command:?}"),
            Self::Module(module) => write!(f, "module {module}"),
            Self::Filename(path) => write!(f, "filename {path}"),
        }
    }
}

/// How the runtime entry point should run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode<'a> {
    /// Execute source text.
    Command(&'a str),
    /// Run a module as `__main__`.
    Module(&'a str),
    /// Run a script file.
    Filename(&'a Utf8Path),
    /// Interactive prompt.
    Interactive,
    /// Read the program from standard input.
    Stdin,
}
