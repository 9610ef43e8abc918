//! Byte-level walk over the option prefix of a command line.
//!
//! Both the pre-configuration prescan and the full parser need to know where
//! option processing ends; they share this tokeniser so they agree.

/// One option recognised in the option prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Flag without a value, such as `-I`.
    Flag(u8),
    /// Option taking a value (`-W`, `-X`, `-c`, `-m`); `None` when the value
    /// is missing.
    Valued(u8, Option<&'a [u8]>),
    /// Long option name, without the leading dashes or any `=value`.
    Long(&'a [u8]),
}

/// Result of scanning a command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Scan<'a> {
    pub(crate) tokens: Vec<Token<'a>>,
    /// Index of the first argument that belongs to the program: everything
    /// before it is option processing, including the directive itself.
    pub(crate) end: usize,
}

const fn takes_value(flag: u8) -> bool {
    matches!(flag, b'W' | b'X')
}

const fn ends_options(flag: u8) -> bool {
    matches!(flag, b'c' | b'm')
}

/// Long options whose value is the next argument.
const LONG_WITH_VALUE: &[&[u8]] = &[b"check-hash-based-pycs"];

/// Scan `args`, skipping the program name at index 0.
pub(crate) fn scan<T: AsRef<[u8]>>(args: &[T]) -> Scan<'_> {
    let mut tokens = Vec::new();
    let mut index = 1;
    while let Some(arg) = args.get(index).map(AsRef::<[u8]>::as_ref) {
        if arg == b"--" {
            return Scan {
                tokens,
                end: (index + 2).min(args.len()),
            };
        }
        let Some(cluster) = arg.strip_prefix(b"-").filter(|rest| !rest.is_empty()) else {
            // A positional script or `-` for stdin.
            return Scan {
                tokens,
                end: index + 1,
            };
        };
        if let Some(long) = cluster.strip_prefix(b"-") {
            let name = long
                .split(|byte| *byte == b'=')
                .next()
                .unwrap_or_default();
            let inline = name.len() < long.len();
            if !inline && LONG_WITH_VALUE.contains(&name) {
                index += 1;
            }
            tokens.push(Token::Long(name));
            index += 1;
            continue;
        }
        for (position, flag) in cluster.iter().copied().enumerate() {
            if !takes_value(flag) && !ends_options(flag) {
                tokens.push(Token::Flag(flag));
                continue;
            }
            let attached = cluster.get(position + 1..).filter(|value| !value.is_empty());
            let value = if attached.is_some() {
                attached
            } else {
                index += 1;
                args.get(index).map(AsRef::<[u8]>::as_ref)
            };
            tokens.push(Token::Valued(flag, value));
            if ends_options(flag) {
                return Scan {
                    tokens,
                    end: (index + 1).min(args.len()),
                };
            }
            break;
        }
        index += 1;
    }
    Scan {
        tokens,
        end: args.len(),
    }
}
