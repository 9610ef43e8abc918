//! Unit tests for error classification and outcome conversion.

use clap::{Command, error::ErrorKind as ClapErrorKind};
use rstest::rstest;

use super::{BootError, ErrorKind, Outcome, is_display_request};

fn build_error(kind: ClapErrorKind) -> clap::Error {
    Command::new("demo").error(kind, "demo output")
}

#[rstest]
#[case(ClapErrorKind::DisplayHelp)]
#[case(ClapErrorKind::DisplayVersion)]
fn recognises_display_requests(#[case] kind: ClapErrorKind) {
    assert!(is_display_request(&build_error(kind)));
}

#[rstest]
#[case(ClapErrorKind::UnknownArgument)]
#[case(ClapErrorKind::InvalidValue)]
fn rejects_regular_errors(#[case] kind: ClapErrorKind) {
    assert!(!is_display_request(&build_error(kind)));
}

#[rstest]
#[case(BootError::NoMemory, ErrorKind::NoMemory)]
#[case(BootError::internal("config", "bad"), ErrorKind::Internal)]
#[case(BootError::InvalidState { operation: "run_main", state: "unstarted" }, ErrorKind::Internal)]
#[case(BootError::user("preconfig", "bad"), ErrorKind::User)]
fn errors_map_to_error_outcomes(#[case] err: BootError, #[case] expected: ErrorKind) {
    match Outcome::from(err) {
        Outcome::Error { kind, .. } => assert_eq!(kind, expected),
        other => panic!("expected error outcome, got {other:?}"),
    }
}

#[test]
fn exit_request_is_not_an_error() {
    let outcome = Outcome::from(BootError::exit(2));
    assert!(outcome.is_exit());
    assert!(!outcome.is_error());
    assert_eq!(outcome, Outcome::Exit { status: 2 });
}

#[test]
fn invalid_state_names_the_operation() {
    let outcome = Outcome::from(BootError::InvalidState {
        operation: "run_main",
        state: "pre-initialized",
    });
    assert_eq!(
        outcome,
        Outcome::Error {
            kind: ErrorKind::Internal,
            prefix: String::from("run_main"),
            message: String::from("not allowed in state pre-initialized"),
        }
    );
}

#[rstest]
#[case(Ok(()))]
#[case(Err(BootError::user("argv", "conflicting directives")))]
#[case(Err(BootError::internal("config", "rule loop")))]
#[case(Err(BootError::NoMemory))]
#[case(Err(BootError::exit(0)))]
fn outcome_round_trips_through_result(#[case] result: Result<(), BootError>) {
    let outcome = Outcome::from(result.clone());
    assert_eq!(outcome.into_result(), result);
}

#[test]
fn user_errors_render_with_prefix() {
    let err = BootError::user("config", "PYTHONHASHSEED must be \"random\"");
    assert!(err.is_user_error());
    assert_eq!(err.to_string(), "config: PYTHONHASHSEED must be \"random\"");
    assert!(Outcome::from(err).is_user_error());
}
