//! Core primitives for dynscope
//!
//! This crate defines the parameter cell and everything needed to recognize
//! one:
//! - [`Parameter`]: guarded, identity-tracked cell
//! - [`Guard`]: unary validate-or-transform function
//! - [`is_parameter`]: construction-path identity check
//! - [`ErasedParameter`] / [`AnyParameter`]: sealed type-erased view used by
//!   the scope rebinder
//! - [`Error`]: error taxonomy shared by all dynscope crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod erased;
pub mod error;
pub mod guard;
pub mod parameter;
pub mod registry;

use std::any::Any;

/// Untyped value as it crosses the type-erased boundary
pub type DynValue = Box<dyn Any + Send + Sync>;

pub use erased::{AnyParameter, ErasedParameter};
pub use error::{BoxError, Error, Result, ValidationError};
pub use guard::{BoxedGuardFn, Guard, GuardPtr, SharedGuardFn};
pub use parameter::{
    make_parameter, make_parameter_dyn, make_parameter_with, ParamId, Parameter, ParameterBuilder,
};
pub use registry::{as_parameter, is_parameter};
