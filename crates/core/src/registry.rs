//! Identity tracking for parameters
//!
//! Recognition is by construction path, not by shape. Each successful
//! construction registers the concrete `Parameter<T>` type together with an
//! eraser that turns an untyped reference back into an [`AnyParameter`].
//! Because `Parameter`'s fields are private, a value of that type can only
//! come from the constructor, so a lookalike type with identical methods is
//! never recognized.
//!
//! The registry is keyed by `TypeId` and holds no parameter instances, so it
//! never extends a parameter's lifetime.

use crate::erased::AnyParameter;
use crate::parameter::Parameter;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};

type Eraser = fn(&dyn Any) -> Option<AnyParameter>;

static ERASERS: Lazy<RwLock<FxHashMap<TypeId, Eraser>>> = Lazy::new(|| {
    let mut erasers = FxHashMap::default();
    // An erased handle is itself a genuine parameter
    erasers.insert(TypeId::of::<AnyParameter>(), erase_any as Eraser);
    RwLock::new(erasers)
});

fn erase_any(value: &dyn Any) -> Option<AnyParameter> {
    value.downcast_ref::<AnyParameter>().cloned()
}

fn erase<T: Clone + Send + Sync + 'static>(value: &dyn Any) -> Option<AnyParameter> {
    value.downcast_ref::<Parameter<T>>().map(Parameter::erased)
}

pub(crate) fn register<T: Clone + Send + Sync + 'static>() {
    let key = TypeId::of::<Parameter<T>>();
    if ERASERS.read().contains_key(&key) {
        return;
    }
    ERASERS.write().entry(key).or_insert(erase::<T> as Eraser);
}

/// Whether `value` is a parameter produced by the construction path.
///
/// Accepts typed handles (`Parameter<T>`) and erased handles
/// ([`AnyParameter`]). Pass the value itself, not a box around it: for a
/// `Box<dyn Any>` use `is_parameter(boxed.as_ref())`.
pub fn is_parameter(value: &dyn Any) -> bool {
    ERASERS.read().contains_key(&value.type_id())
}

/// Recover an erased handle from an untyped value.
///
/// Returns `None` for anything [`is_parameter`] rejects.
pub fn as_parameter(value: &dyn Any) -> Option<AnyParameter> {
    let eraser = *ERASERS.read().get(&value.type_id())?;
    eraser(value)
}
