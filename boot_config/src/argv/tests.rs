//! Tests for the command-line prescan and parser.

use rstest::rstest;

use super::scan::{Token, scan};
use super::*;
use crate::config::ConfigOverlay;
use crate::preconfig::{PreConfigOverlay, Utf8Mode};
use crate::{RawArg, StringList};

fn raw(args: &[&str]) -> Vec<RawArg> {
    args.iter().copied().map(RawArg::from).collect()
}

fn owned(args: &[&str]) -> Vec<String> {
    args.iter().copied().map(str::to_owned).collect()
}

fn list(items: &[&str]) -> StringList {
    items.iter().copied().collect()
}

#[rstest]
fn scan_splits_clusters_and_values() {
    let args = ["python", "-IW", "error", "-Xdev", "-c", "pass", "-v"];
    let scanned = scan(&args);
    assert_eq!(
        scanned.tokens,
        [
            Token::Flag(b'I'),
            Token::Valued(b'W', Some(b"error".as_slice())),
            Token::Valued(b'X', Some(b"dev".as_slice())),
            Token::Valued(b'c', Some(b"pass".as_slice())),
        ]
    );
    assert_eq!(scanned.end, 6);
}

#[rstest]
#[case(&["python"], 1)]
#[case(&["python", "script.py", "-I"], 2)]
#[case(&["python", "-", "arg"], 2)]
#[case(&["python", "-E", "--", "-script.py", "arg"], 4)]
#[case(&["python", "-mvenv", "env"], 2)]
#[case(&["python", "--check-hash-based-pycs", "always", "main.py"], 4)]
fn scan_finds_end_of_options(#[case] args: &[&str], #[case] end: usize) {
    assert_eq!(scan(args).end, end);
}

#[rstest]
fn prescan_reads_pre_configuration_options() {
    let overlay = prescan(&raw(&["python", "-I", "-E", "-X", "dev", "-Xutf8=0"]))
        .expect("valid command line");
    assert_eq!(
        overlay,
        PreConfigOverlay {
            isolated: Some(true),
            use_environment: Some(false),
            dev_mode: Some(true),
            utf8_mode: Some(Utf8Mode::Off),
            ..PreConfigOverlay::default()
        }
    );
}

#[rstest]
#[case(&["python", "-c", "-I"])]
#[case(&["python", "script.py", "-I"])]
#[case(&["python", "--", "-I"])]
#[case(&["python", "-", "-I"])]
#[case(&["python", "-W", "-I"])]
fn prescan_stops_where_options_end(#[case] args: &[&str]) {
    let overlay = prescan(&raw(args)).expect("valid command line");
    assert_eq!(overlay.isolated, None);
}

#[rstest]
fn prescan_ignores_undecodable_program_arguments() {
    let mut args = raw(&["python", "-Xutf8", "script.py"]);
    args.push(RawArg::from_bytes(vec![0xff, 0xfe]));
    let overlay = prescan(&args).expect("bytes after the script are not inspected");
    assert_eq!(overlay.utf8_mode, Some(Utf8Mode::On));
}

#[rstest]
fn prescan_rejects_bad_utf8_option() {
    let err = prescan(&raw(&["python", "-X", "utf8=2"])).expect_err("invalid value");
    assert!(err.is_user_error());
}

#[rstest]
fn parser_maps_flags_to_fields() {
    let overlay = ClapArgvParser
        .parse(&owned(&[
            "python", "-bb", "-B", "-I", "-OO", "-q", "-s", "-S", "-u", "-vvv", "-x", "-i",
            "-W", "ignore", "-X", "importtime",
        ]))
        .expect("valid command line");
    assert_eq!(overlay.bytes_warning, Some(2));
    assert_eq!(overlay.write_bytecode, Some(false));
    assert_eq!(overlay.isolated, Some(true));
    assert_eq!(overlay.optimization_level, Some(2));
    assert_eq!(overlay.quiet, Some(true));
    assert_eq!(overlay.user_site_directory, Some(false));
    assert_eq!(overlay.site_import, Some(false));
    assert_eq!(overlay.buffered_stdio, Some(false));
    assert_eq!(overlay.verbose, Some(3));
    assert_eq!(overlay.skip_source_first_line, Some(true));
    assert_eq!(overlay.inspect, Some(true));
    assert_eq!(overlay.interactive, Some(true));
    assert_eq!(overlay.warnoptions, Some(list(&["ignore"])));
    assert_eq!(overlay.xoptions, Some(list(&["importtime"])));
    assert_eq!(overlay.argv, Some(list(&[""])));
    assert_eq!(overlay.use_environment, None);
}

#[rstest]
#[case(&["python", "-s", "-s"], |o: &ConfigOverlay| o.user_site_directory == Some(false))]
#[case(&["python", "-EE"], |o: &ConfigOverlay| o.use_environment == Some(false))]
#[case(&["python", "-uu"], |o: &ConfigOverlay| o.buffered_stdio == Some(false))]
#[case(&["python", "-ii"], |o: &ConfigOverlay| o.inspect == Some(true))]
#[case(&["python", "-I", "-BqSxI", "-c", "pass"], |o: &ConfigOverlay| o.isolated == Some(true))]
fn parser_accepts_repeated_flags(
    #[case] args: &[&str],
    #[case] expected: fn(&ConfigOverlay) -> bool,
) {
    let overlay = ClapArgvParser
        .parse(&owned(args))
        .expect("repeated flags are accepted");
    assert!(expected(&overlay), "unexpected overlay: {overlay:?}");
}

#[rstest]
fn prescan_and_parser_agree_on_repeated_flags() {
    let args = ["python", "-EE", "-c", "pass"];
    let pre = prescan(&raw(&args)).expect("prescan accepts -EE");
    let overlay = ClapArgvParser
        .parse(&owned(&args))
        .expect("parser accepts -EE");
    assert_eq!(pre.use_environment, Some(false));
    assert_eq!(overlay.use_environment, Some(false));
}

#[rstest]
#[case(&["python", "-c", "print(1)", "a", "-v"], &["-c", "a", "-v"])]
#[case(&["python", "-m", "pip", "install"], &["-m", "install"])]
#[case(&["python", "main.py", "--flag"], &["main.py", "--flag"])]
#[case(&["python", "-"], &["-"])]
fn parser_builds_program_argv(#[case] args: &[&str], #[case] argv: &[&str]) {
    let overlay = ClapArgvParser.parse(&owned(args)).expect("valid command line");
    assert_eq!(overlay.argv, Some(list(argv)));
    assert_eq!(overlay.orig_argv, Some(list(args)));
    assert_eq!(overlay.verbose, None);
}

#[rstest]
fn parser_records_directives() {
    let command = ClapArgvParser
        .parse(&owned(&["python", "-c", "-pass"]))
        .expect("hyphenated command text");
    assert_eq!(command.run_command.as_deref(), Some("-pass"));
    let script = ClapArgvParser
        .parse(&owned(&["python", "main.py"]))
        .expect("script");
    assert_eq!(script.run_filename.as_deref().map(|path| path.as_str()), Some("main.py"));
}

#[rstest]
fn parser_reads_hash_pyc_mode() {
    let overlay = ClapArgvParser
        .parse(&owned(&["python", "--check-hash-based-pycs", "never"]))
        .expect("valid command line");
    assert_eq!(
        overlay.check_hash_pycs_mode,
        Some(crate::config::HashPycsMode::Never)
    );
}

#[rstest]
#[case(&["python", "-h"], 0)]
#[case(&["python", "-?"], 0)]
#[case(&["python", "--version"], 0)]
#[case(&["python", "--no-such-option"], USAGE_ERROR_STATUS)]
#[case(&["python", "-O", "-Z"], USAGE_ERROR_STATUS)]
fn parser_reports_exit_requests(#[case] args: &[&str], #[case] status: i32) {
    let err = ClapArgvParser.parse(&owned(args)).expect_err("parser must exit");
    assert_eq!(err, BootError::exit(status));
}
