//! Environment variables read during configuration.

use camino::Utf8PathBuf;

use crate::codec::Decoder;
use crate::env::{Environment, level_flag};
use crate::{BootError, BootResult, StringList};

use super::ConfigOverlay;

const PREFIX: &str = "config";

struct Reader<'a> {
    env: &'a dyn Environment,
    decoder: Decoder,
}

impl Reader<'_> {
    fn text(&self, name: &str) -> BootResult<Option<String>> {
        self.env
            .get_nonempty(name)
            .map(|raw| self.decoder.decode(&raw, name))
            .transpose()
    }

    /// Level of an integer flag; `None` when unset or zero.
    fn level(&self, name: &str) -> BootResult<Option<u8>> {
        Ok(self
            .text(name)?
            .map(|value| level_flag(&value))
            .filter(|level| *level > 0))
    }

    fn flag(&self, name: &str) -> BootResult<bool> {
        Ok(self.level(name)?.is_some())
    }
}

/// Build the environment overlay for the configuration.
pub(crate) fn read_environment(
    env: &dyn Environment,
    decoder: Decoder,
) -> BootResult<ConfigOverlay> {
    let reader = Reader { env, decoder };
    let mut overlay = ConfigOverlay {
        parser_debug: reader.level("PYTHONDEBUG")?,
        verbose: reader.level("PYTHONVERBOSE")?,
        optimization_level: reader.level("PYTHONOPTIMIZE")?,
        pycache_prefix: reader.text("PYTHONPYCACHEPREFIX")?.map(Utf8PathBuf::from),
        home: reader.text("PYTHONHOME")?.map(Utf8PathBuf::from),
        pythonpath_env: reader.text("PYTHONPATH")?,
        ..ConfigOverlay::default()
    };
    let enabled = |name: &str| -> BootResult<Option<bool>> { Ok(reader.flag(name)?.then_some(true)) };
    let disabled = |name: &str| -> BootResult<Option<bool>> { Ok(reader.flag(name)?.then_some(false)) };
    overlay.inspect = enabled("PYTHONINSPECT")?;
    overlay.dump_refs = enabled("PYTHONDUMPREFS")?;
    overlay.malloc_stats = enabled("PYTHONMALLOCSTATS")?;
    overlay.import_time = enabled("PYTHONPROFILEIMPORTTIME")?;
    overlay.write_bytecode = disabled("PYTHONDONTWRITEBYTECODE")?;
    overlay.user_site_directory = disabled("PYTHONNOUSERSITE")?;
    overlay.buffered_stdio = disabled("PYTHONUNBUFFERED")?;
    if reader.text("PYTHONFAULTHANDLER")?.is_some() {
        overlay.faulthandler = Some(true);
    }
    if reader.text("PYTHONDEVMODE")?.is_some() {
        overlay.dev_mode = Some(true);
    }
    if let Some(value) = reader.text("PYTHONIOENCODING")? {
        let (encoding, errors) = split_io_encoding(&value);
        overlay.stdio_encoding = encoding;
        overlay.stdio_errors = errors;
    }
    if let Some(value) = reader.text("PYTHONTRACEMALLOC")? {
        overlay.tracemalloc = Some(value.parse().map_err(|_| {
            BootError::user(
                PREFIX,
                "PYTHONTRACEMALLOC: invalid number of frames, must be in range [0; 65535]",
            )
        })?);
    }
    if let Some(value) = reader.text("PYTHONHASHSEED")? {
        let seed = parse_hash_seed(&value)?;
        overlay.use_hash_seed = Some(seed.is_some());
        overlay.hash_seed = Some(seed.unwrap_or_default());
    }
    if let Some(value) = reader.text("PYTHONWARNINGS")? {
        overlay.warnoptions = Some(split_warnings(&value));
    }
    Ok(overlay)
}

/// Split `encoding[:errors]`; empty halves are left unset.
fn split_io_encoding(value: &str) -> (Option<String>, Option<String>) {
    let (encoding, errors) = value
        .split_once(':')
        .map_or((value, None), |(encoding, errors)| (encoding, Some(errors)));
    let nonempty = |part: &str| (!part.is_empty()).then(|| part.to_owned());
    (nonempty(encoding), errors.and_then(nonempty))
}

/// `random` yields `None`; otherwise a 32-bit seed.
fn parse_hash_seed(value: &str) -> BootResult<Option<u32>> {
    if value == "random" {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| {
        BootError::user(
            PREFIX,
            "PYTHONHASHSEED must be \"random\" or an integer in range [0; 4294967295]",
        )
    })
}

fn split_warnings(value: &str) -> StringList {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}
