//! Scoped Rebinding Tests
//!
//! Tests for parameterize: rebinding, restoration on every exit path,
//! duplicate bindings, guard enforcement and malformed input.

use crate::*;
use std::panic::{catch_unwind, AssertUnwindSafe};

// =============================================================================
// BASIC REBINDING
// =============================================================================

#[test]
fn test_rebinding_doubles_and_restores() {
    init_tracing();
    let n = make_parameter(1i64).unwrap();

    let out = parameterize([(&n, 100i64)], || n.get() * 2).unwrap();

    assert_eq!(out, 200);
    assert_eq!(n.get(), 1);
}

#[test]
fn test_empty_body_round_trip() {
    let p = make_parameter(String::from("kept")).unwrap();
    parameterize([(&p, String::from("temp"))], || {}).unwrap();
    assert_eq!(p.get(), "kept");
}

#[test]
fn test_multiple_parameters_of_different_types() {
    let name = make_parameter(String::from("anon")).unwrap();
    let level = make_parameter(0u8).unwrap();
    let verbose = make_parameter(false).unwrap();

    let out = parameterize(
        [
            Binding::new(&name, String::from("alice")),
            Binding::new(&level, 3),
            Binding::new(&verbose, true),
        ],
        || format!("{}:{}:{}", name.get(), level.get(), verbose.get()),
    )
    .unwrap();

    assert_eq!(out, "alice:3:true");
    assert_eq!(name.get(), "anon");
    assert_eq!(level.get(), 0);
    assert!(!verbose.get());
}

#[test]
fn test_rebinding_visible_in_called_functions() {
    fn log_line(prefix: &Parameter<String>, msg: &str) -> String {
        format!("[{}] {}", prefix.get(), msg)
    }
    fn handle(prefix: &Parameter<String>) -> String {
        log_line(prefix, "handled")
    }

    let prefix = make_parameter(String::from("main")).unwrap();
    let inside = parameterize([(&prefix, String::from("worker"))], || handle(&prefix)).unwrap();

    assert_eq!(inside, "[worker] handled");
    assert_eq!(handle(&prefix), "[main] handled");
}

#[test]
fn test_set_inside_scope_is_discarded_on_exit() {
    let p = make_parameter(1i64).unwrap();
    parameterize([(&p, 2i64)], || {
        p.set(3).unwrap();
        assert_eq!(p.get(), 3);
    })
    .unwrap();
    assert_eq!(p.get(), 1);
}

#[test]
fn test_parameters_outside_bindings_untouched() {
    let bound = make_parameter(1i64).unwrap();
    let free = make_parameter(10i64).unwrap();
    parameterize([(&bound, 2i64)], || assert_eq!(free.get(), 10)).unwrap();
    assert_eq!(free.get(), 10);
}

// =============================================================================
// FAILURE PATHS
// =============================================================================

#[derive(Debug)]
enum JobError {
    Scope(Error),
    Failed(i64),
}

impl From<Error> for JobError {
    fn from(e: Error) -> Self {
        JobError::Scope(e)
    }
}

#[test]
fn test_failing_body_restores() {
    let p = make_parameter(1i64).unwrap();
    let result: std::result::Result<i64, JobError> =
        try_parameterize([(&p, 50i64)], || Err(JobError::Failed(p.get())));
    assert!(matches!(result, Err(JobError::Failed(50))));
    assert_eq!(p.get(), 1);
}

#[test]
fn test_scope_error_converted_for_fallible_body() {
    let p = positive_param(1);
    let result: std::result::Result<i64, JobError> = try_parameterize([(&p, -3i64)], || Ok(p.get()));
    assert!(matches!(result, Err(JobError::Scope(ref e)) if e.is_validation()));
    assert_eq!(p.get(), 1);
}

#[test]
fn test_panicking_body_restores() {
    let p = make_parameter(1i64).unwrap();
    let result = catch_unwind(AssertUnwindSafe(|| {
        parameterize([(&p, 2i64)], || -> i64 { panic!("body panicked") })
    }));
    assert!(result.is_err());
    assert_eq!(p.get(), 1);
}

#[test]
fn test_guard_rejection_fails_and_restores() {
    let p = positive_param(5);
    let mut ran = false;

    let err = parameterize([(&p, -1i64)], || ran = true).unwrap_err();

    assert!(err.is_validation());
    assert!(!ran);
    assert_eq!(p.get(), 5);
}

#[test]
fn test_guard_rejection_restores_earlier_bindings() {
    let first = make_parameter(String::from("a")).unwrap();
    let guarded = positive_param(1);

    let err = parameterize(
        [
            Binding::new(&first, String::from("changed")),
            Binding::new(&guarded, 0),
        ],
        || (),
    )
    .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(first.get(), "a");
    assert_eq!(guarded.get(), 1);
}

#[test]
fn test_guard_transforms_bound_value() {
    let p = make_parameter_with(String::from("x"), |s: String| Ok(s.to_uppercase())).unwrap();
    let seen = parameterize([(&p, String::from("inner"))], || p.get()).unwrap();
    assert_eq!(seen, "INNER");
    assert_eq!(p.get(), "X");
}

// =============================================================================
// DUPLICATE BINDINGS
// =============================================================================

#[test]
fn test_duplicate_binding_last_wins_and_original_restored() {
    let p = make_parameter(String::from("orig")).unwrap();

    let out = parameterize(
        [(&p, String::from("x")), (&p, String::from("y"))],
        || p.get(),
    )
    .unwrap();

    assert_eq!(out, "y");
    assert_eq!(p.get(), "orig");
}

#[test]
fn test_duplicate_through_clone_is_same_parameter() {
    let p = make_parameter(0i64).unwrap();
    let alias = p.clone();
    let out = parameterize([(&p, 1i64), (&alias, 2i64)], || p.get()).unwrap();
    assert_eq!(out, 2);
    assert_eq!(p.get(), 0);
}

// =============================================================================
// LOOSE PAIRS
// =============================================================================

#[test]
fn test_loose_pairs_rebind() {
    let p = make_parameter(1i64).unwrap();
    let bindings = Binding::from_pairs(vec![loose(p.clone(), 9i64)]).unwrap();
    let out = parameterize(bindings, || p.get()).unwrap();
    assert_eq!(out, 9);
    assert_eq!(p.get(), 1);
}

#[test]
fn test_loose_pair_with_non_parameter_rejected() {
    let p = make_parameter(1i64).unwrap();
    let pairs = vec![loose(p.clone(), 2i64), loose(|| 1i64, 3i64)];
    let err = Binding::from_pairs(pairs).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(p.get(), 1);
}

#[test]
fn test_loose_pair_wrong_arity_rejected() {
    let p = make_parameter(1i64).unwrap();
    let mut pair = loose(p.clone(), 2i64);
    pair.pop();
    let err = Binding::from_pair(pair).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("pair"));
}

#[test]
fn test_mismatched_value_type_rejected_before_mutation() {
    let a = make_parameter(1i64).unwrap();
    let b = make_parameter(String::from("b")).unwrap();
    let bindings =
        Binding::from_pairs(vec![loose(a.clone(), 2i64), loose(b.clone(), 3i64)]).unwrap();

    let mut ran = false;
    let err = parameterize(bindings, || ran = true).unwrap_err();

    assert!(err.is_invalid_argument());
    assert!(!ran);
    assert_eq!(a.get(), 1);
    assert_eq!(b.get(), "b");
}

// =============================================================================
// SCOPE FRAME
// =============================================================================

#[test]
fn test_frame_restores_on_early_return() {
    fn lookup(p: &Parameter<i64>, fail: bool) -> Result<i64> {
        let _frame = ScopeFrame::enter([(p, 42i64)])?;
        if fail {
            return Err(Error::invalid_argument("early exit"));
        }
        Ok(p.get())
    }

    let p = make_parameter(0i64).unwrap();
    assert_eq!(lookup(&p, false).unwrap(), 42);
    assert_eq!(p.get(), 0);
    assert!(lookup(&p, true).is_err());
    assert_eq!(p.get(), 0);
}
