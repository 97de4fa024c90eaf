//! # dynscope
//!
//! Opt-in dynamic scope for Rust.
//!
//! A [`Parameter`] is a shared, guarded cell. [`parameterize`] rebinds a set
//! of parameters for the duration of a body and restores the previous values
//! afterwards, whatever way the body exits. Code reached from the body, however
//! deeply, reads the rebound values without having them passed down.
//!
//! ## Quick Start
//!
//! ```ignore
//! use dynscope::prelude::*;
//!
//! let indent = make_parameter(0usize)?;
//!
//! fn render(indent: &Parameter<usize>, line: &str) -> String {
//!     format!("{}{}", " ".repeat(indent.get()), line)
//! }
//!
//! let nested = parameterize([(&indent, 4)], || render(&indent, "child"))?;
//! assert_eq!(nested, "    child");
//! assert_eq!(render(&indent, "root"), "root");
//! ```
//!
//! ## Guards
//!
//! A guard validates or normalizes every value a parameter receives,
//! including the initial value and values bound by a scope:
//!
//! ```ignore
//! let retries = make_parameter_with(3u32, |n| {
//!     if n > 10 {
//!         return Err(ValidationError::new("at most 10 retries"));
//!     }
//!     Ok(n)
//! })?;
//!
//! assert!(parameterize([(&retries, 50)], || ()).is_err());
//! assert_eq!(retries.get(), 3);
//! ```
//!
//! ## Sharing
//!
//! Parameters are process-wide. A scope is visible to every thread and task
//! that reads the same parameter while it is active; there is no per-thread
//! isolation.
//!
//! ## Crates
//!
//! - `dynscope-core` - [`Parameter`], [`Guard`], identity registry, errors
//! - `dynscope-scope` - [`Binding`], [`ScopeFrame`], the `parameterize` family

#![warn(missing_docs)]

pub mod prelude;

pub use dynscope_core::{
    as_parameter, is_parameter, make_parameter, make_parameter_dyn, make_parameter_with,
    AnyParameter, BoxError, BoxedGuardFn, DynValue, Error, ErasedParameter, Guard, GuardPtr,
    ParamId, Parameter, ParameterBuilder, Result, SharedGuardFn, ValidationError,
};
pub use dynscope_scope::{
    parameterize, parameterize_async, try_parameterize, try_parameterize_async, Binding,
    ScopeFrame,
};
