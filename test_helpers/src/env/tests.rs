//! Unit tests for environment helpers.

use std::sync::{Arc, Barrier};
use std::thread;

use super::*;

fn value(key: &str) -> Option<String> {
    env::var(key).ok()
}

#[test]
fn guard_restores_previous_value() {
    let _outer = set_var("BOOT_HELPERS_RESTORE", "original");
    {
        let _inner = set_var("BOOT_HELPERS_RESTORE", "changed");
        assert_eq!(value("BOOT_HELPERS_RESTORE").as_deref(), Some("changed"));
    }
    assert_eq!(value("BOOT_HELPERS_RESTORE").as_deref(), Some("original"));
}

#[test]
fn guard_removes_previously_absent_value() {
    let _absent = remove_var("BOOT_HELPERS_ABSENT");
    {
        let _guard = set_var("BOOT_HELPERS_ABSENT", "temporary");
        assert!(value("BOOT_HELPERS_ABSENT").is_some());
    }
    assert!(value("BOOT_HELPERS_ABSENT").is_none());
}

#[test]
fn scope_restores_in_reverse_order() {
    let _base = set_var("BOOT_HELPERS_STACK", "base");
    {
        let scope = EnvScope::new_with(|lock| {
            vec![
                lock.set_var("BOOT_HELPERS_STACK", "first"),
                lock.set_var("BOOT_HELPERS_STACK", "second"),
            ]
        });
        assert_eq!(scope.len(), 2);
        assert_eq!(value("BOOT_HELPERS_STACK").as_deref(), Some("second"));
    }
    assert_eq!(value("BOOT_HELPERS_STACK").as_deref(), Some("base"));
}

#[test]
fn runtime_scope_clears_runtime_variables() {
    let _leaked = set_var("PYTHONBOOTHELPERSLEAK", "1");
    let _lang = set_var("LANG", "fr_FR.UTF-8");
    {
        let _scope = EnvScope::runtime("C", &[("PYTHONVERBOSE", "2")]);
        assert!(value("PYTHONBOOTHELPERSLEAK").is_none());
        assert!(value("LANG").is_none());
        assert_eq!(value("LC_CTYPE").as_deref(), Some("C"));
        assert_eq!(value("PYTHONVERBOSE").as_deref(), Some("2"));
    }
    assert_eq!(value("PYTHONBOOTHELPERSLEAK").as_deref(), Some("1"));
    assert_eq!(value("LANG").as_deref(), Some("fr_FR.UTF-8"));
}

#[test]
fn concurrent_guards_on_distinct_keys_do_not_interfere() {
    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let start = Arc::clone(&barrier);
            thread::spawn(move || {
                let key = format!("BOOT_HELPERS_WORKER_{worker}");
                let _base = set_var(&key, "original");
                start.wait();
                for iteration in 0..50 {
                    let expected = format!("value-{iteration}");
                    let guard = set_var(&key, &expected);
                    assert_eq!(value(&key), Some(expected));
                    drop(guard);
                    assert_eq!(value(&key).as_deref(), Some("original"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }
}
