//! Runtime entry point that prints the frozen configuration.

use std::io::{self, Write};

use boot_config::{FrozenConfig, Runtime, process_state};
use serde_json::{Value, json};

use crate::error::{BootctlError, Result};

/// Output format selected by `BOOTCTL_FORMAT`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `key = value` line per field.
    #[default]
    Text,
    /// A single pretty-printed JSON document.
    Json,
}

impl OutputFormat {
    /// Parse a format name; `None` selects the default.
    pub fn parse(name: Option<&str>) -> Result<Self> {
        match name.map(str::trim) {
            None | Some("" | "text") => Ok(Self::Text),
            Some("json") => Ok(Self::Json),
            Some(other) => Err(BootctlError::UnknownFormat(other.to_owned())),
        }
    }
}

/// Prints the configuration it is handed and exits successfully.
#[derive(Clone, Copy, Debug)]
pub struct DumpRuntime {
    format: OutputFormat,
}

impl DumpRuntime {
    /// Runtime printing in `format`.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn dump(self, config: &FrozenConfig, out: &mut impl Write) -> Result<()> {
        let document = json!({
            "process": process_state(),
            "config": config,
        });
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &document)?;
                writeln!(out)?;
            }
            OutputFormat::Text => write_text(&document, "", out)?,
        }
        Ok(())
    }
}

impl Runtime for DumpRuntime {
    fn run(&mut self, config: &FrozenConfig) -> i32 {
        let mut stdout = io::stdout().lock();
        match self.dump(config, &mut stdout) {
            Ok(()) => 0,
            Err(err) => {
                tracing::error!(error = %err, "configuration dump failed");
                1
            }
        }
    }
}

/// Flatten nested objects into dotted keys.
fn write_text(value: &Value, prefix: &str, out: &mut impl Write) -> io::Result<()> {
    let Value::Object(fields) = value else {
        return writeln!(out, "{prefix} = {value}");
    };
    for (key, field) in fields {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        write_text(field, &path, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, OutputFormat::Text)]
    #[case(Some(""), OutputFormat::Text)]
    #[case(Some("text"), OutputFormat::Text)]
    #[case(Some(" json "), OutputFormat::Json)]
    fn formats_parse(#[case] name: Option<&str>, #[case] expected: OutputFormat) {
        assert_eq!(OutputFormat::parse(name).expect("known format"), expected);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = OutputFormat::parse(Some("yaml")).expect_err("unknown format");
        assert!(matches!(err, BootctlError::UnknownFormat(name) if name == "yaml"));
    }

    #[test]
    fn text_flattens_nested_objects() {
        let document = json!({"config": {"verbose": 2, "directive": {"kind": "module", "value": "venv"}}});
        let mut out = Vec::new();
        write_text(&document, "", &mut out).expect("write to vec");
        let text = String::from_utf8(out).expect("utf-8 output");
        assert_eq!(
            text,
            "config.directive.kind = \"module\"\nconfig.directive.value = \"venv\"\nconfig.verbose = 2\n"
        );
    }
}
