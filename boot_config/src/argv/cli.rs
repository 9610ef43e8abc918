//! Full command-line grammar, parsed with `clap` once decoding is possible.

use clap::{ArgAction, Parser};

use crate::StringList;
use crate::config::{ConfigOverlay, HashPycsMode};
use crate::paths::RUNTIME_VERSION;

/// Runtime command-line options.
///
/// Only the option prefix is handed to `clap`; arguments after the
/// directive belong to the program and are copied into `argv` verbatim.
#[derive(Debug, Parser)]
#[command(
    name = "python",
    version = RUNTIME_VERSION,
    about = "Start the runtime",
    args_override_self = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub(crate) struct CommandLine {
    /// Program passed in as string (terminates option list).
    #[arg(short = 'c', value_name = "cmd", allow_hyphen_values = true)]
    command: Option<String>,

    /// Run library module as a script (terminates option list).
    #[arg(
        short = 'm',
        value_name = "mod",
        allow_hyphen_values = true,
        conflicts_with = "command"
    )]
    module: Option<String>,

    /// Program read from script file; `-` reads the program from stdin.
    #[arg(value_name = "file", conflicts_with_all = ["command", "module"])]
    script: Option<String>,

    /// Issue warnings about bytes/str comparisons (-bb: errors).
    #[arg(short = 'b', action = ArgAction::Count)]
    bytes_warning: u8,

    /// Don't write bytecode caches on import.
    #[arg(short = 'B')]
    dont_write_bytecode: bool,

    /// Turn on parser debugging output.
    #[arg(short = 'd', action = ArgAction::Count)]
    parser_debug: u8,

    /// Ignore PYTHON* environment variables.
    #[arg(short = 'E')]
    ignore_environment: bool,

    /// Print this help message and exit.
    #[arg(short = 'h', short_alias = '?', long = "help", action = ArgAction::Help)]
    help: Option<bool>,

    /// Inspect interactively after running the script.
    #[arg(short = 'i')]
    inspect: bool,

    /// Isolate from the user's environment (implies -E and -s).
    #[arg(short = 'I')]
    isolate: bool,

    /// Remove assert statements (-OO: also docstrings).
    #[arg(short = 'O', action = ArgAction::Count)]
    optimize: u8,

    /// Don't print the version and copyright messages on interactive startup.
    #[arg(short = 'q')]
    quiet: bool,

    /// Don't add the user site directory to the search path.
    #[arg(short = 's')]
    no_user_site: bool,

    /// Don't import the site module on initialization.
    #[arg(short = 'S')]
    no_site: bool,

    /// Force unbuffered binary standard streams.
    #[arg(short = 'u')]
    unbuffered: bool,

    /// Trace import statements (repeat for more detail).
    #[arg(short = 'v', action = ArgAction::Count)]
    verbose: u8,

    /// Print the runtime version number and exit.
    #[arg(short = 'V', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Warning control.
    #[arg(short = 'W', value_name = "arg", allow_hyphen_values = true)]
    warnoptions: Vec<String>,

    /// Skip the first line of source.
    #[arg(short = 'x')]
    skip_first_line: bool,

    /// Implementation-specific option.
    #[arg(short = 'X', value_name = "opt", allow_hyphen_values = true)]
    xoptions: Vec<String>,

    /// Control validation of hash-based bytecode caches.
    #[arg(long = "check-hash-based-pycs", value_enum, value_name = "mode")]
    check_hash_pycs_mode: Option<HashPycsMode>,
}

impl CommandLine {
    /// Convert the parsed options into an overlay.
    ///
    /// `args` is the full command line and `program_args` the arguments
    /// after the option prefix.
    pub(crate) fn into_overlay(self, args: &[String], program_args: &[String]) -> ConfigOverlay {
        let mut argv = StringList::new();
        let mut overlay = ConfigOverlay::default();
        if let Some(command) = self.command {
            argv.push("-c");
            overlay.run_command = Some(command);
        } else if let Some(module) = self.module {
            argv.push("-m");
            overlay.run_module = Some(module);
        } else if let Some(script) = self.script {
            argv.push(script.as_str());
            overlay.run_filename = Some(script.into());
        } else {
            argv.push("");
        }
        argv.extend(program_args.iter().map(String::as_str));

        let set = |flag: bool, value: bool| flag.then_some(value);
        let level = |count: u8| (count > 0).then_some(count);
        ConfigOverlay {
            argv: Some(argv),
            orig_argv: Some(args.iter().map(String::as_str).collect()),
            isolated: set(self.isolate, true),
            use_environment: set(self.ignore_environment, false),
            user_site_directory: set(self.no_user_site, false),
            site_import: set(self.no_site, false),
            write_bytecode: set(self.dont_write_bytecode, false),
            buffered_stdio: set(self.unbuffered, false),
            inspect: set(self.inspect, true),
            interactive: set(self.inspect, true),
            quiet: set(self.quiet, true),
            skip_source_first_line: set(self.skip_first_line, true),
            verbose: level(self.verbose),
            parser_debug: level(self.parser_debug),
            optimization_level: level(self.optimize),
            bytes_warning: level(self.bytes_warning),
            check_hash_pycs_mode: self.check_hash_pycs_mode,
            warnoptions: (!self.warnoptions.is_empty())
                .then(|| self.warnoptions.into_iter().collect()),
            xoptions: (!self.xoptions.is_empty()).then(|| self.xoptions.into_iter().collect()),
            ..overlay
        }
    }
}
