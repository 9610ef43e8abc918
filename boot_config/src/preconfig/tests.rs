//! Tests for pre-configuration resolution.

use rstest::{fixture, rstest};

use super::rules::apply_pre_rules;
use super::store::PreConfigStore;
use super::*;
use crate::codec::TextCodec;
use crate::layer::{OverlayLayer, SourceRank};
use crate::{LegacyGlobals, MapEnvironment, RawArg};

struct Inputs {
    globals: LegacyGlobals,
    environment: MapEnvironment,
    locale: FixedLocale,
    args: Option<Vec<RawArg>>,
    file: Option<PreConfigOverlay>,
    explicit: Option<PreConfigOverlay>,
}

impl Inputs {
    fn resolve(&self) -> crate::BootResult<FrozenPreConfig> {
        resolve_preconfig(&PreConfigSources {
            globals: &self.globals,
            environment: &self.environment,
            locale: &self.locale,
            args: self.args.as_deref(),
            file: self.file.as_ref(),
            explicit: self.explicit.as_ref(),
        })
    }

    fn with_env(mut self, name: &str, value: &str) -> Self {
        self.environment.insert(name, value);
        self
    }

    fn with_args(mut self, args: &[&str]) -> Self {
        self.args = Some(args.iter().copied().map(RawArg::from).collect());
        self
    }

    fn with_file(mut self, file: PreConfigOverlay) -> Self {
        self.file = Some(file);
        self
    }

    fn with_explicit(mut self, explicit: PreConfigOverlay) -> Self {
        self.explicit = Some(explicit);
        self
    }
}

#[fixture]
fn inputs() -> Inputs {
    Inputs {
        globals: LegacyGlobals::default(),
        environment: MapEnvironment::new(),
        locale: FixedLocale::new("en_GB.UTF-8"),
        args: None,
        file: None,
        explicit: None,
    }
}

#[rstest]
fn defaults_resolve_without_sources(inputs: Inputs) {
    let pre = inputs.resolve().expect("defaults resolve");
    assert_eq!(pre.allocator, Allocator::Default);
    assert_eq!(pre.coerce_c_locale, CoerceLocale::Probe);
    assert!(!pre.utf8_mode);
    assert!(!pre.isolated);
    assert!(pre.use_environment);
    assert!(!pre.coerce_locale);
    assert_eq!(pre.filesystem_codec, TextCodec::Utf8);
    assert_eq!(pre.rank_of("allocator"), Some(SourceRank::Default));
}

#[rstest]
fn default_valued_overlays_change_nothing(inputs: Inputs) {
    let baseline = inputs.resolve().expect("defaults resolve");
    let explicit = PreConfigOverlay {
        allocator: Some(Allocator::Default),
        coerce_c_locale: Some(CoerceLocale::Probe),
        coerce_c_locale_warn: Some(false),
        utf8_mode: Some(Utf8Mode::Auto),
        isolated: Some(false),
        use_environment: Some(true),
        dev_mode: Some(false),
        legacy_windows_fs_encoding: Some(false),
    };
    let pre = inputs.with_explicit(explicit).resolve().expect("explicit defaults");
    assert_eq!(pre.allocator, baseline.allocator);
    assert_eq!(pre.utf8_mode, baseline.utf8_mode);
    assert_eq!(pre.use_environment, baseline.use_environment);
    assert_eq!(pre.filesystem_codec, baseline.filesystem_codec);
    assert_eq!(pre.rank_of("allocator"), Some(SourceRank::Explicit));
}

#[rstest]
fn explicit_rank_is_never_overridden(inputs: Inputs) {
    let pre = inputs
        .with_env("PYTHONMALLOC", "malloc")
        .with_env("PYTHONUTF8", "1")
        .with_args(&["python", "-X", "utf8=1"])
        .with_explicit(PreConfigOverlay {
            allocator: Some(Allocator::Pymalloc),
            utf8_mode: Some(Utf8Mode::Off),
            ..PreConfigOverlay::default()
        })
        .resolve()
        .expect("valid sources");
    assert_eq!(pre.allocator, Allocator::Pymalloc);
    assert!(!pre.utf8_mode);
    assert_eq!(pre.rank_of("utf8_mode"), Some(SourceRank::Explicit));
}

#[rstest]
fn dev_mode_selects_debug_allocator(inputs: Inputs) {
    let pre = inputs.with_args(&["python", "-X", "dev"]).resolve().expect("valid");
    assert!(pre.dev_mode);
    assert_eq!(pre.allocator, Allocator::Debug);
    assert!(pre.coerce_c_locale_warn);
}

#[rstest]
fn pythonmalloc_overrides_dev_mode_allocator(inputs: Inputs) {
    let pre = inputs
        .with_env("PYTHONDEVMODE", "1")
        .with_env("PYTHONMALLOC", "mimalloc")
        .resolve()
        .expect("valid");
    assert!(pre.dev_mode);
    assert_eq!(pre.allocator, Allocator::Mimalloc);
}

#[rstest]
fn legacy_fs_encoding_disables_utf8_mode(inputs: Inputs) {
    let pre = inputs
        .with_env("PYTHONUTF8", "1")
        .with_explicit(PreConfigOverlay {
            legacy_windows_fs_encoding: Some(true),
            ..PreConfigOverlay::default()
        })
        .resolve()
        .expect("valid");
    assert!(pre.legacy_windows_fs_encoding);
    assert!(!pre.utf8_mode);
}

#[rstest]
fn isolation_disables_environment_after_it_was_read(inputs: Inputs) {
    let pre = inputs
        .with_env("PYTHONUTF8", "1")
        .with_args(&["python", "-I"])
        .resolve()
        .expect("valid");
    assert!(pre.isolated);
    assert!(!pre.use_environment);
    assert!(pre.utf8_mode);
}

#[rstest]
#[case::command_line(&["python", "-E"], None)]
#[case::explicit(&["python"], Some(false))]
fn closed_gate_skips_environment(
    inputs: Inputs,
    #[case] args: &[&str],
    #[case] use_environment: Option<bool>,
) {
    let pre = inputs
        .with_env("PYTHONUTF8", "1")
        .with_env("PYTHONMALLOC", "not-an-allocator")
        .with_args(args)
        .with_explicit(PreConfigOverlay {
            use_environment,
            ..PreConfigOverlay::default()
        })
        .resolve()
        .expect("environment must not be read");
    assert!(!pre.use_environment);
    assert!(!pre.utf8_mode);
    assert_eq!(pre.allocator, Allocator::Default);
}

#[rstest]
fn legacy_globals_close_the_gate(mut inputs: Inputs) {
    inputs.globals.ignore_environment = true;
    let pre = inputs.with_env("PYTHONDEVMODE", "1").resolve().expect("valid");
    assert!(!pre.dev_mode);
    assert_eq!(pre.rank_of("use_environment"), Some(SourceRank::GlobalCompat));
}

#[rstest]
#[case("PYTHONMALLOC", "jemalloc", "unknown allocator")]
#[case("PYTHONUTF8", "2", "invalid PYTHONUTF8")]
fn malformed_environment_is_a_user_error(
    inputs: Inputs,
    #[case] name: &str,
    #[case] value: &str,
    #[case] needle: &str,
) {
    let err = inputs.with_env(name, value).resolve().expect_err("must fail");
    assert!(err.is_user_error());
    assert!(err.to_string().contains(needle), "{err}");
}

#[rstest]
#[case("0", CoerceLocale::Off, false)]
#[case("warn", CoerceLocale::Probe, true)]
#[case("1", CoerceLocale::Force, false)]
fn coerce_locale_variable(
    inputs: Inputs,
    #[case] value: &str,
    #[case] mode: CoerceLocale,
    #[case] warn: bool,
) {
    let pre = inputs
        .with_env("PYTHONCOERCECLOCALE", value)
        .resolve()
        .expect("valid");
    assert_eq!(pre.coerce_c_locale, mode);
    assert_eq!(pre.coerce_c_locale_warn, warn);
}

#[rstest]
#[case("C", CoerceLocale::Probe, true, true)]
#[case("POSIX", CoerceLocale::Off, false, true)]
#[case("en_GB.UTF-8", CoerceLocale::Force, true, false)]
#[case("en_GB.UTF-8", CoerceLocale::Probe, false, false)]
fn locale_probe_decides_coercion_and_utf8(
    mut inputs: Inputs,
    #[case] locale: &str,
    #[case] mode: CoerceLocale,
    #[case] coerced: bool,
    #[case] utf8_mode: bool,
) {
    if cfg!(windows) {
        return;
    }
    inputs.locale = FixedLocale::new(locale);
    let pre = inputs
        .with_explicit(PreConfigOverlay {
            coerce_c_locale: Some(mode),
            ..PreConfigOverlay::default()
        })
        .resolve()
        .expect("valid");
    assert_eq!(pre.coerce_locale, coerced);
    assert_eq!(pre.utf8_mode, utf8_mode);
    assert_eq!(pre.filesystem_codec, TextCodec::Utf8);
}

#[rstest]
fn ascii_locale_without_utf8_mode_decodes_ascii(mut inputs: Inputs) {
    if cfg!(windows) {
        return;
    }
    inputs.locale = FixedLocale::new("C");
    let pre = inputs
        .with_explicit(PreConfigOverlay {
            coerce_c_locale: Some(CoerceLocale::Off),
            utf8_mode: Some(Utf8Mode::Off),
            ..PreConfigOverlay::default()
        })
        .resolve()
        .expect("valid");
    assert_eq!(pre.filesystem_codec, TextCodec::Ascii);
    assert_eq!(pre.decoder().codec(), TextCodec::Ascii);
}

#[rstest]
fn reapplying_rules_is_a_no_op() {
    let mut store = PreConfigStore::default();
    store.apply(&OverlayLayer::new(
        SourceRank::CommandLine,
        PreConfigOverlay {
            isolated: Some(true),
            dev_mode: Some(true),
            legacy_windows_fs_encoding: Some(true),
            ..PreConfigOverlay::default()
        },
    ));
    assert!(apply_pre_rules(&mut store));
    let resolved = store.clone();
    assert!(!apply_pre_rules(&mut store));
    assert_eq!(store, resolved);
}

#[rstest]
fn file_dev_mode_selects_debug_allocator(inputs: Inputs) {
    let pre = inputs
        .with_file(PreConfigOverlay {
            dev_mode: Some(true),
            ..PreConfigOverlay::default()
        })
        .resolve()
        .expect("valid");
    assert!(pre.dev_mode);
    assert_eq!(pre.allocator, Allocator::Debug);
    assert!(pre.coerce_c_locale_warn);
    assert_eq!(pre.rank_of("dev_mode"), Some(SourceRank::ConfigFile));
}

#[rstest]
fn file_isolation_closes_environment_gate(inputs: Inputs) {
    let pre = inputs
        .with_env("PYTHONMALLOC", "malloc")
        .with_file(PreConfigOverlay {
            isolated: Some(true),
            ..PreConfigOverlay::default()
        })
        .resolve()
        .expect("environment must not be read");
    assert!(!pre.use_environment);
    assert_eq!(pre.allocator, Allocator::Default);
}
