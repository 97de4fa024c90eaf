//! Parameter primitive implementation
//!
//! A parameter is a shared, guarded cell holding one value. Handles are cheap
//! to clone and all clones address the same cell.
//!
//! ## Invariants
//!
//! - The stored value is always the last value that passed the guard,
//!   including the initial value.
//! - A rejected value never reaches the cell.
//! - Equality is identity. Two parameters holding equal values are still
//!   different parameters.
//!
//! ## Example
//!
//! ```ignore
//! let depth = make_parameter_with(1u32, |d| {
//!     if d == 0 {
//!         return Err(ValidationError::new("depth must be at least 1"));
//!     }
//!     Ok(d)
//! })?;
//!
//! assert_eq!(depth.get(), 1);
//! depth.set(4)?;
//! assert!(depth.set(0).is_err());
//! assert_eq!(depth.get(), 4);
//! ```

use crate::erased::{sealed, AnyParameter, ErasedParameter};
use crate::error::{Error, Result, ValidationError};
use crate::guard::Guard;
use crate::registry;
use crate::DynValue;
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

static NEXT_PARAM_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a parameter cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(u64);

impl ParamId {
    fn next() -> Self {
        ParamId(NEXT_PARAM_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "param#{}", self.0)
    }
}

struct Cell<T> {
    id: ParamId,
    name: Option<String>,
    value: RwLock<T>,
    guard: Guard<T>,
}

impl<T: Clone + Send + Sync + 'static> Cell<T> {
    fn set(&self, candidate: T) -> Result<T> {
        // Guard runs unlocked so it may read other parameters, or this one via a clone
        let value = self.guard.apply(candidate).map_err(|e| {
            debug!(param = %self.id, name = ?self.name, error = %e, "guard rejected value");
            e
        })?;
        *self.value.write() = value.clone();
        Ok(value)
    }

    fn downcast(&self, value: DynValue) -> Result<T> {
        value.downcast::<T>().map(|v| *v).map_err(|_| {
            Error::invalid_argument(format!(
                "{} holds values of type {}, got a value of another type",
                self.id,
                std::any::type_name::<T>()
            ))
        })
    }
}

impl<T> sealed::Sealed for Cell<T> {}

impl<T: Clone + Send + Sync + 'static> ErasedParameter for Cell<T> {
    fn id(&self) -> ParamId {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn value_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn accepts(&self, value: &dyn Any) -> bool {
        value.is::<T>()
    }

    fn snapshot(&self) -> DynValue {
        Box::new(self.value.read().clone())
    }

    fn assign(&self, value: DynValue) -> Result<()> {
        let value = self.downcast(value)?;
        self.set(value).map(|_| ())
    }

    fn restore(&self, value: DynValue) -> Result<()> {
        let value = self.downcast(value)?;
        *self.value.write() = value;
        Ok(())
    }
}

/// A guarded, identity-tracked cell.
///
/// Create with [`make_parameter`], [`make_parameter_with`],
/// [`make_parameter_dyn`] or [`Parameter::builder`].
pub struct Parameter<T> {
    cell: Arc<Cell<T>>,
}

impl<T: Clone + Send + Sync + 'static> Parameter<T> {
    /// Configure a parameter before constructing it
    pub fn builder() -> ParameterBuilder<T> {
        ParameterBuilder::new()
    }

    fn construct(initial: T, guard: Guard<T>, name: Option<String>) -> Result<Self> {
        let value = guard.apply(initial).map_err(|e| {
            debug!(name = ?name, error = %e, "initial value rejected, no parameter created");
            e
        })?;

        let cell = Arc::new(Cell {
            id: ParamId::next(),
            name,
            value: RwLock::new(value),
            guard,
        });
        registry::register::<T>();

        debug!(
            param = %cell.id,
            name = ?cell.name,
            value_type = std::any::type_name::<T>(),
            "parameter created"
        );
        Ok(Parameter { cell })
    }

    /// Current value. Does not run the guard.
    pub fn get(&self) -> T {
        self.cell.value.read().clone()
    }

    /// Replace the value.
    ///
    /// The candidate goes through the guard and the guard's output is stored
    /// and returned. On rejection the previous value stays current.
    pub fn set(&self, value: T) -> Result<T> {
        self.cell.set(value)
    }

    /// Call-style access: no arguments reads, one argument writes.
    ///
    /// More than one argument is rejected with `InvalidArgument` and the cell
    /// is left untouched.
    pub fn invoke(&self, mut args: Vec<T>) -> Result<T> {
        if args.len() > 1 {
            return Err(Error::invalid_argument(format!(
                "parameter call takes 0 or 1 arguments, got {}",
                args.len()
            )));
        }
        match args.pop() {
            None => Ok(self.get()),
            Some(value) => self.set(value),
        }
    }

    /// Identity of the cell
    pub fn id(&self) -> ParamId {
        self.cell.id
    }

    /// Diagnostic name, if configured
    pub fn name(&self) -> Option<&str> {
        self.cell.name.as_deref()
    }

    /// True if both handles address the same cell
    pub fn ptr_eq(&self, other: &Parameter<T>) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }

    /// Type-erased handle to the same cell
    pub fn erased(&self) -> AnyParameter {
        self.cell.clone()
    }
}

impl<T> Clone for Parameter<T> {
    fn clone(&self) -> Self {
        Parameter {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T> PartialEq for Parameter<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cell.id == other.cell.id
    }
}

impl<T> Eq for Parameter<T> {}

impl<T> Hash for Parameter<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cell.id.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Parameter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("id", &self.cell.id)
            .field("name", &self.cell.name)
            .field("value", &*self.cell.value.read())
            .finish()
    }
}

/// Builder for a [`Parameter`].
///
/// ```ignore
/// let verbosity = Parameter::builder()
///     .name("verbosity")
///     .guard(|v: u8| Ok(v.min(3)))
///     .build(1)?;
/// ```
pub struct ParameterBuilder<T> {
    name: Option<String>,
    guard: Guard<T>,
}

impl<T: Clone + Send + Sync + 'static> ParameterBuilder<T> {
    /// Builder with no name and the identity guard
    pub fn new() -> Self {
        Self {
            name: None,
            guard: Guard::identity(),
        }
    }

    /// Name shown in logs and `Debug` output
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Guard as a closure
    pub fn guard<F>(mut self, f: F) -> Self
    where
        F: Fn(T) -> std::result::Result<T, ValidationError> + Send + Sync + 'static,
    {
        self.guard = Guard::from_fn(f);
        self
    }

    /// Guard as a prepared [`Guard`]
    pub fn guard_with(mut self, guard: Guard<T>) -> Self {
        self.guard = guard;
        self
    }

    /// Guard the initial value and construct the parameter
    pub fn build(self, initial: T) -> Result<Parameter<T>> {
        Parameter::construct(initial, self.guard, self.name)
    }
}

impl<T: Clone + Send + Sync + 'static> Default for ParameterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a parameter with the identity guard
pub fn make_parameter<T: Clone + Send + Sync + 'static>(initial: T) -> Result<Parameter<T>> {
    Parameter::construct(initial, Guard::identity(), None)
}

/// Create a parameter whose values pass through `guard`.
///
/// The initial value is guarded too; if the guard rejects it the error is
/// returned and no parameter exists.
pub fn make_parameter_with<T, F>(initial: T, guard: F) -> Result<Parameter<T>>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> std::result::Result<T, ValidationError> + Send + Sync + 'static,
{
    Parameter::construct(initial, Guard::from_fn(guard), None)
}

/// Create a parameter from an untyped guard candidate.
///
/// `None` means the identity guard. A candidate that is not a unary guard
/// over `T` fails with `InvalidGuard` before the initial value is looked at.
pub fn make_parameter_dyn<T: Clone + Send + Sync + 'static>(
    initial: T,
    guard: Option<DynValue>,
) -> Result<Parameter<T>> {
    let guard = match guard {
        Some(candidate) => Guard::from_dyn(candidate)?,
        None => Guard::identity(),
    };
    Parameter::construct(initial, guard, None)
}
