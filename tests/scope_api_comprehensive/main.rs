//! Scope API Comprehensive Test Suite
//!
//! End-to-end tests for parameters and scoped rebinding through the public
//! `dynscope` facade.
//!
//! ## Modules
//!
//! - `construction`: constructors, guards, builder
//! - `identity`: construction-path recognition, lookalikes
//! - `scoping`: parameterize, restoration on every exit path, loose pairs
//! - `nesting`: layered scopes
//! - `async_scope`: suspended bodies and cancellation
//! - `concurrency`: cross-thread visibility of shared parameters
//! - `properties`: property-based checks
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test scope_api_comprehensive
//!
//! # Scoping tests only
//! cargo test --test scope_api_comprehensive scoping::
//! ```

pub use dynscope::prelude::*;
pub use dynscope::{make_parameter_dyn, DynValue};

pub mod scoping;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Install a test subscriber so scope events show up in failing test output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Untyped `(parameter, value)` pair, as a host holding `Any` values builds it
pub fn loose(
    param: impl std::any::Any + Send + Sync,
    value: impl std::any::Any + Send + Sync,
) -> Vec<DynValue> {
    let mut pair: Vec<DynValue> = Vec::with_capacity(2);
    pair.push(Box::new(param));
    pair.push(Box::new(value));
    pair
}

/// Guard rejecting non-positive integers
pub fn positive(v: i64) -> std::result::Result<i64, ValidationError> {
    if v <= 0 {
        return Err(ValidationError::new(format!("{} is not positive", v)));
    }
    Ok(v)
}

/// Parameter holding `initial` that only accepts positive values
pub fn positive_param(initial: i64) -> Parameter<i64> {
    make_parameter_with(initial, positive).expect("initial value must be positive")
}
