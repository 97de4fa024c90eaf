//! Binding pairs: a parameter and the value it takes inside a scope
//!
//! Typed bindings come from `(&Parameter<T>, T)` tuples or [`Binding::new`].
//! Hosts that only hold untyped values (an embedded interpreter, a plugin
//! boundary) build them with [`Binding::from_pair`], which performs the shape
//! and identity checks up front.

use dynscope_core::{as_parameter, AnyParameter, DynValue, Error, Parameter, Result};
use std::fmt;

/// One `(parameter, value)` pair for a scope
pub struct Binding {
    param: AnyParameter,
    value: DynValue,
}

impl Binding {
    /// Bind a typed parameter
    pub fn new<T: Clone + Send + Sync + 'static>(param: &Parameter<T>, value: T) -> Self {
        Binding {
            param: param.erased(),
            value: Box::new(value),
        }
    }

    /// Bind an erased parameter.
    ///
    /// The value's type is checked when the scope is entered.
    pub fn erased(param: AnyParameter, value: DynValue) -> Self {
        Binding { param, value }
    }

    /// Build a binding from an untyped pair.
    ///
    /// The pair must have exactly two elements and its first element must be a
    /// parameter (typed or erased); otherwise `InvalidArgument`.
    pub fn from_pair(pair: Vec<DynValue>) -> Result<Self> {
        let len = pair.len();
        let mut elements = pair.into_iter();
        let (candidate, value) = match (elements.next(), elements.next(), elements.next()) {
            (Some(candidate), Some(value), None) => (candidate, value),
            _ => {
                return Err(Error::invalid_argument(format!(
                    "binding must be a (parameter, value) pair, got {} element(s)",
                    len
                )))
            }
        };

        let param = as_parameter(candidate.as_ref()).ok_or_else(|| {
            Error::invalid_argument("first element of a binding pair is not a parameter")
        })?;
        Ok(Binding { param, value })
    }

    /// Build bindings from a list of untyped pairs.
    ///
    /// Every pair is checked; the first malformed one is reported.
    pub fn from_pairs(pairs: Vec<Vec<DynValue>>) -> Result<Vec<Self>> {
        pairs.into_iter().map(Binding::from_pair).collect()
    }

    /// The bound parameter
    pub fn param(&self) -> &AnyParameter {
        &self.param
    }

    /// Fails with `InvalidArgument` if the value does not fit the parameter
    pub(crate) fn check(&self) -> Result<()> {
        if self.param.accepts(self.value.as_ref()) {
            return Ok(());
        }
        Err(Error::invalid_argument(format!(
            "{} holds values of type {}, binding supplies a value of another type",
            self.param.id(),
            self.param.value_type()
        )))
    }

    pub(crate) fn into_parts(self) -> (AnyParameter, DynValue) {
        (self.param, self.value)
    }
}

impl<T: Clone + Send + Sync + 'static> From<(&Parameter<T>, T)> for Binding {
    fn from((param, value): (&Parameter<T>, T)) -> Self {
        Binding::new(param, value)
    }
}

impl<T: Clone + Send + Sync + 'static> From<(Parameter<T>, T)> for Binding {
    fn from((param, value): (Parameter<T>, T)) -> Self {
        Binding::new(&param, value)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("param", &self.param)
            .finish_non_exhaustive()
    }
}
