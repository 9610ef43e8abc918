//! Unit tests for rank ordering and slot semantics.

use rstest::rstest;

use super::{LayerComposer, SourceRank, ValueSlot};

#[test]
fn ranks_are_totally_ordered() {
    let ranks = SourceRank::ALL;
    for pair in ranks.windows(2) {
        if let [lower, higher] = pair {
            assert!(lower < higher, "{lower} should rank below {higher}");
        }
    }
}

#[rstest]
#[case(SourceRank::Default)]
#[case(SourceRank::GlobalCompat)]
#[case(SourceRank::Environment)]
#[case(SourceRank::ConfigFile)]
#[case(SourceRank::CommandLine)]
fn explicit_writes_are_never_overridden(#[case] lower: SourceRank) {
    let mut slot = ValueSlot::new(String::from("default"));
    assert!(slot.set(String::from("explicit"), SourceRank::Explicit));
    assert!(!slot.set(String::from("lower"), lower));
    assert_eq!(slot.get(), "explicit");
    assert_eq!(slot.rank(), SourceRank::Explicit);
}

#[test]
fn equal_rank_writes_replace_the_value() {
    let mut slot = ValueSlot::new(0_u8);
    assert!(slot.set(1, SourceRank::Environment));
    assert!(slot.set(2, SourceRank::Environment));
    assert_eq!(*slot.get(), 2);
    assert!(slot.ignored_writes().is_empty());
}

#[test]
fn ignored_writes_are_recorded() {
    let mut slot = ValueSlot::new(false);
    slot.set(true, SourceRank::CommandLine);
    slot.set(false, SourceRank::Environment);
    let ignored = slot.ignored_writes();
    assert_eq!(ignored.len(), 1);
    let first = ignored.first().expect("one ignored write");
    assert_eq!(first.rank, SourceRank::Environment);
    assert_eq!(first.held, SourceRank::CommandLine);
    assert_eq!(first.value, "false");
}

#[test]
fn ignored_write_record_is_bounded() {
    let mut slot = ValueSlot::new(0_u32);
    slot.set(1, SourceRank::Explicit);
    for value in 0..100 {
        assert!(!slot.set(value, SourceRank::Environment));
    }
    assert_eq!(slot.ignored_writes().len(), 8);
    assert_eq!(*slot.get(), 1);
}

#[test]
fn derived_override_keeps_layered_value() {
    let mut slot = ValueSlot::new(true);
    slot.set(true, SourceRank::GlobalCompat);
    assert!(slot.derive(false));
    assert!(!*slot.get());
    assert!(*slot.layered());
    assert_eq!(slot.rank(), SourceRank::GlobalCompat);
    assert!(!slot.derive(false), "re-deriving the same value is a no-op");
}

#[test]
fn pinning_follows_rank() {
    let mut slot = ValueSlot::new(0_u32);
    assert!(!slot.is_pinned());
    slot.set(5, SourceRank::ConfigFile);
    assert!(slot.is_pinned());
    assert!(slot.is_pinned_at(SourceRank::Environment));
    assert!(slot.is_pinned_at(SourceRank::ConfigFile));
    assert!(!slot.is_pinned_at(SourceRank::CommandLine));
}

#[test]
fn composer_sorts_layers_stably() {
    let mut composer = LayerComposer::new();
    composer.push_command_line("argv-1");
    composer.push_environment("env");
    composer.push_command_line("argv-2");
    composer.push_file("file");
    let order: Vec<_> = composer
        .layers()
        .into_iter()
        .map(|layer| (layer.rank(), layer.into_overlay()))
        .collect();
    assert_eq!(
        order,
        vec![
            (SourceRank::Environment, "env"),
            (SourceRank::ConfigFile, "file"),
            (SourceRank::CommandLine, "argv-1"),
            (SourceRank::CommandLine, "argv-2"),
        ]
    );
}
