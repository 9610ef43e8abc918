//! Tests for the TOML configuration loader.

use camino::Utf8PathBuf;
use figment::Jail;
use rstest::rstest;

use super::*;
use crate::StringList;

fn paths(names: &[&str]) -> Vec<Utf8PathBuf> {
    names.iter().copied().map(Utf8PathBuf::from).collect()
}

fn jail_error(err: crate::BootError) -> figment::Error {
    figment::Error::from(err.to_string())
}

#[rstest]
fn later_files_win_field_by_field() {
    Jail::expect_with(|jail| {
        jail.create_file("base.toml", "verbose = 1\nquiet = true\n")?;
        jail.create_file("local.toml", "verbose = 3\nwarnoptions = [\"error\"]\n")?;
        let overlay = TomlFileLoader
            .load(&paths(&["base.toml", "local.toml"]))
            .map_err(jail_error)?;
        assert_eq!(overlay.verbose, Some(3));
        assert_eq!(overlay.quiet, Some(true));
        assert_eq!(overlay.warnoptions, Some(StringList::from(vec!["error".to_owned()])));
        Ok(())
    });
}

#[rstest]
fn missing_files_are_skipped() {
    Jail::expect_with(|jail| {
        jail.create_file("present.toml", "run_module = \"http.server\"\n")?;
        let overlay = TomlFileLoader
            .load(&paths(&["absent.toml", "present.toml"]))
            .map_err(jail_error)?;
        assert_eq!(overlay.run_module.as_deref(), Some("http.server"));
        Ok(())
    });
}

#[rstest]
fn no_files_yield_an_empty_overlay() {
    let overlay = TomlFileLoader.load(&[]).expect("nothing to load");
    assert_eq!(overlay, crate::ConfigOverlay::default());
}

#[rstest]
#[case("verbose = ", "broken.toml")]
#[case("no_such_field = 1\n", "invalid configuration")]
#[case("verbose = \"loud\"\n", "invalid configuration")]
fn malformed_files_are_user_errors(#[case] contents: &str, #[case] needle: &str) {
    Jail::expect_with(|jail| {
        jail.create_file("broken.toml", contents)?;
        let err = TomlFileLoader
            .load(&paths(&["broken.toml"]))
            .expect_err("file must be rejected");
        assert!(err.is_user_error());
        let message = err.to_string();
        assert!(message.starts_with("config_file: "), "{message}");
        assert!(message.contains(needle), "{message}");
        Ok(())
    });
}
