//! `bootctl`: bootstraps a runtime configuration from the real process and
//! prints the result.
//!
//! Every argument is handed to the runtime's own command-line grammar, so
//! `bootctl -I -X dev -c pass` shows what the runtime would run with.
//! `BOOTCTL_CONFIG` lists TOML configuration files, `BOOTCTL_FORMAT` selects
//! `text` or `json` output and `BOOTCTL_LOG` sets the log filter.

mod dump;
mod error;

use std::env;

use boot_config::{
    Bootstrap, Outcome, RawArg, exit_on_error, initialize_from_args, install, run_main,
};
use camino::Utf8PathBuf;
use tracing_subscriber::EnvFilter;

use crate::dump::{DumpRuntime, OutputFormat};
use crate::error::{BootctlError, Result};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();
    let status = run()?;
    std::process::exit(status)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("BOOTCTL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<i32> {
    let format = OutputFormat::parse(env::var("BOOTCTL_FORMAT").ok().as_deref())?;
    let bootstrap = Bootstrap::new()
        .with_config_files(config_files()?)
        .with_runtime(DumpRuntime::new(format));
    settle(install(bootstrap));

    let args: Vec<RawArg> = env::args_os().map(RawArg::from).collect();
    settle(initialize_from_args(None, &args));
    Ok(run_main().unwrap_or_else(|err| exit_on_error(Outcome::from(err))))
}

/// Configuration files named by `BOOTCTL_CONFIG`, in precedence order.
fn config_files() -> Result<Vec<Utf8PathBuf>> {
    let Some(raw) = env::var_os("BOOTCTL_CONFIG") else {
        return Ok(Vec::new());
    };
    env::split_paths(&raw)
        .filter(|path| !path.as_os_str().is_empty())
        .map(|path| Utf8PathBuf::from_path_buf(path).map_err(BootctlError::NonUtf8Path))
        .collect()
}

fn settle(outcome: Outcome) {
    if !outcome.is_ok() {
        exit_on_error(outcome);
    }
}
