//! Type-erased view of a parameter
//!
//! The scope rebinder handles parameters of different value types in one
//! binding list, so it works through [`ErasedParameter`]. The trait is sealed:
//! the only implementor is the cell behind [`Parameter`](crate::Parameter),
//! which makes an [`AnyParameter`] as unforgeable as the typed handle.

use crate::error::Result;
use crate::parameter::ParamId;
use crate::DynValue;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Shared, type-erased handle to a parameter cell
pub type AnyParameter = Arc<dyn ErasedParameter>;

/// Operations on a parameter without knowing its value type.
///
/// Values cross this boundary as [`DynValue`]s.
pub trait ErasedParameter: sealed::Sealed + Send + Sync {
    /// Identity of the underlying cell
    fn id(&self) -> ParamId;

    /// Diagnostic name, if one was configured
    fn name(&self) -> Option<&str>;

    /// Name of the value type `T`
    fn value_type(&self) -> &'static str;

    /// Whether `value` has this parameter's value type
    fn accepts(&self, value: &dyn Any) -> bool;

    /// Clone of the current value
    fn snapshot(&self) -> DynValue;

    /// Set the value through the guard.
    ///
    /// Fails with `InvalidArgument` on a type mismatch and `Validation` when
    /// the guard rejects it. The cell is unchanged on failure.
    fn assign(&self, value: DynValue) -> Result<()>;

    /// Write back a value previously taken with [`snapshot`](Self::snapshot).
    ///
    /// Skips the guard: the value already passed it once.
    fn restore(&self, value: DynValue) -> Result<()>;
}

impl fmt::Debug for dyn ErasedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyParameter")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("value_type", &self.value_type())
            .finish()
    }
}
