//! Guards: unary validate-or-transform functions attached to a parameter
//!
//! A guard receives every candidate value before it is stored and returns
//! either the value to store (possibly normalized) or a [`ValidationError`].

use crate::error::{Error, Result, ValidationError};
use crate::DynValue;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

type GuardFn<T> = dyn Fn(T) -> std::result::Result<T, ValidationError> + Send + Sync;

/// Plain function pointer form of a guard, accepted by [`Guard::from_dyn`]
pub type GuardPtr<T> = fn(T) -> std::result::Result<T, ValidationError>;

/// Boxed closure form of a guard, accepted by [`Guard::from_dyn`]
pub type BoxedGuardFn<T> = Box<dyn Fn(T) -> std::result::Result<T, ValidationError> + Send + Sync>;

/// Shared closure form of a guard, accepted by [`Guard::from_dyn`]
pub type SharedGuardFn<T> = Arc<dyn Fn(T) -> std::result::Result<T, ValidationError> + Send + Sync>;

/// Validation/transform function for a parameter.
///
/// Cloning a guard shares the underlying function.
pub struct Guard<T> {
    // None is the identity guard
    f: Option<Arc<GuardFn<T>>>,
}

impl<T: 'static> Guard<T> {
    /// Guard that accepts every value unchanged
    pub fn identity() -> Self {
        Guard { f: None }
    }

    /// Wrap a closure as a guard
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(T) -> std::result::Result<T, ValidationError> + Send + Sync + 'static,
    {
        Guard { f: Some(Arc::new(f)) }
    }

    /// Recover a guard from a type-erased candidate.
    ///
    /// Accepts a boxed [`Guard<T>`], [`GuardPtr<T>`], [`BoxedGuardFn<T>`] or
    /// [`SharedGuardFn<T>`]. Anything else is not a unary callable over `T`
    /// and fails with [`Error::InvalidGuard`].
    ///
    /// ```ignore
    /// let clamp: BoxedGuardFn<u8> = Box::new(|v| Ok(v.min(3)));
    /// let guard = Guard::<u8>::from_dyn(Box::new(clamp))?;
    /// ```
    pub fn from_dyn(candidate: DynValue) -> Result<Self> {
        let candidate = match candidate.downcast::<Guard<T>>() {
            Ok(guard) => return Ok(*guard),
            Err(other) => other,
        };
        let candidate = match candidate.downcast::<GuardPtr<T>>() {
            Ok(ptr) => return Ok(Guard::from_fn(*ptr)),
            Err(other) => other,
        };
        let candidate = match candidate.downcast::<BoxedGuardFn<T>>() {
            Ok(boxed) => return Ok(Guard { f: Some(Arc::from(*boxed)) }),
            Err(other) => other,
        };
        match candidate.downcast::<SharedGuardFn<T>>() {
            Ok(shared) => Ok(Guard { f: Some(*shared) }),
            Err(other) => {
                // Box<dyn Any> is itself Any; ask the trait object, not the box
                let actual = <dyn Any as Any>::type_id(&*other);
                Err(Error::InvalidGuard {
                    expected: Self::accepted_shapes(),
                    actual: format!(
                        "a value of {:?}, which matches none of the accepted guard types",
                        actual
                    ),
                })
            }
        }
    }

    fn accepted_shapes() -> String {
        let t = std::any::type_name::<T>();
        format!(
            "one of Guard<{t}>, fn({t}) -> Result<{t}, ValidationError>, \
             Box<dyn Fn({t}) -> Result<{t}, ValidationError> + Send + Sync>, \
             Arc<dyn Fn({t}) -> Result<{t}, ValidationError> + Send + Sync>",
            t = t
        )
    }

    /// Run the guard over a candidate value
    pub fn apply(&self, value: T) -> std::result::Result<T, ValidationError> {
        match &self.f {
            Some(f) => f(value),
            None => Ok(value),
        }
    }

    /// Chain another guard after this one.
    ///
    /// The second guard sees the first guard's output.
    pub fn and_then(self, next: Guard<T>) -> Guard<T> {
        match (self.f, next.f) {
            (None, g) | (g, None) => Guard { f: g },
            (Some(first), Some(second)) => Guard::from_fn(move |v| second(first(v)?)),
        }
    }

    /// True for the identity guard
    pub fn is_identity(&self) -> bool {
        self.f.is_none()
    }
}

impl<T: 'static> Default for Guard<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Guard { f: self.f.clone() }
    }
}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.f {
            Some(_) => f.write_str("Guard(<fn>)"),
            None => f.write_str("Guard(identity)"),
        }
    }
}
