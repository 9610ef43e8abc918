//! Undecoded byte strings and the frozen text codec.
//!
//! Raw host input (arguments, environment values) stays a [`RawArg`] until
//! the pre-configuration is frozen. A [`Decoder`] can only be obtained from a
//! [`crate::FrozenPreConfig`], so no code path can turn bytes into text
//! before the locale and UTF-8 mode are settled.

use std::ffi::{OsStr, OsString};
use std::fmt;

use serde::Serialize;

use crate::{BootError, BootResult};

/// An undecoded byte string supplied by the host.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RawArg(Vec<u8>);

impl RawArg {
    /// Wrap raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Borrow the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns `true` when the value has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// View the bytes as text when they are plain ASCII.
    ///
    /// Pre-configuration values (allocator names, `0`/`1` flags) are ASCII by
    /// contract and may be inspected before a [`Decoder`] exists.
    #[must_use]
    pub fn as_ascii(&self) -> Option<&str> {
        if self.0.is_ascii() {
            std::str::from_utf8(&self.0).ok()
        } else {
            None
        }
    }
}

impl AsRef<[u8]> for RawArg {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for RawArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawArg({:?})", self.0.escape_ascii().to_string())
    }
}

impl From<OsString> for RawArg {
    fn from(value: OsString) -> Self {
        Self(value.into_encoded_bytes())
    }
}

impl From<&OsStr> for RawArg {
    fn from(value: &OsStr) -> Self {
        Self(value.as_encoded_bytes().to_vec())
    }
}

impl From<&str> for RawArg {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for RawArg {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<Vec<u8>> for RawArg {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

/// Text encodings the engine can decode raw input with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextCodec {
    /// Strict UTF-8.
    Utf8,
    /// 7-bit ASCII; the codeset of the `C`/`POSIX` locale.
    Ascii,
    /// ISO-8859-1; every byte maps to one code point.
    Latin1,
}

impl TextCodec {
    /// Pick a codec from a locale codeset name such as `UTF-8` or
    /// `ISO-8859-1`. Unknown codesets fall back to UTF-8.
    #[must_use]
    pub fn from_codeset(codeset: &str) -> Self {
        let normalised: String = codeset
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .map(|ch| ch.to_ascii_lowercase())
            .collect();
        match normalised.as_str() {
            "" | "ascii" | "usascii" | "ansix341968" => Self::Ascii,
            "iso88591" | "latin1" | "l1" => Self::Latin1,
            _ => Self::Utf8,
        }
    }

    /// Canonical codec name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin-1",
        }
    }
}

impl fmt::Display for TextCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decodes [`RawArg`] values with the frozen filesystem codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoder {
    codec: TextCodec,
}

impl Decoder {
    pub(crate) const fn new(codec: TextCodec) -> Self {
        Self { codec }
    }

    /// Codec used for decoding.
    #[must_use]
    pub const fn codec(self) -> TextCodec {
        self.codec
    }

    /// Decode `raw`, naming it `what` in any error.
    ///
    /// # Errors
    ///
    /// Returns a user error when `raw` is not valid in the frozen codec, and
    /// [`BootError::NoMemory`] when the output buffer cannot be allocated.
    pub fn decode(self, raw: &RawArg, what: &str) -> BootResult<String> {
        let bytes = raw.as_bytes();
        let mut text = String::new();
        text.try_reserve(bytes.len())
            .map_err(|_| BootError::NoMemory)?;
        match self.codec {
            TextCodec::Utf8 => {
                let decoded = std::str::from_utf8(bytes).map_err(|err| {
                    decode_error(what, self.codec, err.valid_up_to())
                })?;
                text.push_str(decoded);
            }
            TextCodec::Ascii => {
                if let Some(position) = bytes.iter().position(|byte| !byte.is_ascii()) {
                    return Err(decode_error(what, self.codec, position));
                }
                text.extend(bytes.iter().copied().map(char::from));
            }
            TextCodec::Latin1 => text.extend(bytes.iter().copied().map(char::from)),
        }
        Ok(text)
    }

    /// Decode every value in `raws`, naming failures `"{what} {index}"`.
    ///
    /// # Errors
    ///
    /// Returns the first decoding failure.
    pub fn decode_all(self, raws: &[RawArg], what: &str) -> BootResult<Vec<String>> {
        raws.iter()
            .enumerate()
            .map(|(index, raw)| self.decode(raw, &format!("{what} {index}")))
            .collect()
    }
}

fn decode_error(what: &str, codec: TextCodec, position: usize) -> BootError {
    BootError::user(
        "decode",
        format!("unable to decode {what}: invalid {codec} byte sequence at position {position}"),
    )
}
