//! Scope frame: snapshot, apply, restore
//!
//! A [`ScopeFrame`] is the live state of one rebinding. Entering a frame runs
//! the first half of the protocol and dropping it runs the second half, so
//! restoration happens on every exit path: normal return, early `?`, panic
//! unwinding, and a dropped future.
//!
//! ## Entry Sequence
//!
//! ```text
//! 1. check()     - every binding fits its parameter (no mutation yet)
//! 2. snapshot    - current value of each distinct parameter, input order
//! 3. assign()    - each (parameter, value) through the guard, input order
//! 4. IF a guard rejects: drop the frame (restores) and return the error
//! ```
//!
//! ## Exit
//!
//! Every snapshot is written back, in snapshot order, without re-running the
//! guard. A parameter listed twice was snapshotted once, so it returns to its
//! value from before the scope, never to the first duplicate's value.

use crate::binding::Binding;
use dynscope_core::{AnyParameter, DynValue, Result};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::{error, trace, warn};

/// Active rebinding of a set of parameters.
///
/// Restores the saved values when dropped.
///
/// ```ignore
/// let n = make_parameter(1i64)?;
/// {
///     let _frame = ScopeFrame::enter([(&n, 100i64)])?;
///     assert_eq!(n.get(), 100);
/// }
/// assert_eq!(n.get(), 1);
/// ```
#[must_use = "dropping a ScopeFrame immediately restores the bindings"]
#[derive(Debug)]
pub struct ScopeFrame {
    saved: Vec<(AnyParameter, DynValue)>,
}

impl ScopeFrame {
    /// Validate, snapshot and apply `bindings`.
    ///
    /// Malformed input fails with `InvalidArgument` before any parameter is
    /// touched. A guard rejection during application restores every
    /// snapshotted parameter before the error is returned.
    pub fn enter<I, B>(bindings: I) -> Result<Self>
    where
        I: IntoIterator<Item = B>,
        B: Into<Binding>,
    {
        let bindings: Vec<Binding> = bindings.into_iter().map(Into::into).collect();
        for binding in &bindings {
            binding.check()?;
        }

        let mut seen = FxHashSet::default();
        let mut saved = Vec::with_capacity(bindings.len());
        for binding in &bindings {
            let param = binding.param();
            if seen.insert(param.id()) {
                saved.push((Arc::clone(param), param.snapshot()));
            }
        }
        let frame = ScopeFrame { saved };

        trace!(
            bindings = bindings.len(),
            parameters = frame.saved.len(),
            "entering scope"
        );

        for binding in bindings {
            let (param, value) = binding.into_parts();
            if let Err(e) = param.assign(value) {
                warn!(
                    param = %param.id(),
                    name = ?param.name(),
                    error = %e,
                    "rebinding rejected, restoring scope"
                );
                return Err(e);
            }
        }

        Ok(frame)
    }

    /// Number of distinct parameters this frame will restore
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    /// True if the frame binds nothing
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    /// Restore now instead of at drop
    pub fn exit(self) {
        drop(self)
    }

    fn restore(&mut self) {
        for (param, value) in self.saved.drain(..) {
            // Snapshots come from the same cell, so a mismatch is a bug
            if let Err(e) = param.restore(value) {
                error!(param = %param.id(), error = %e, "failed to restore parameter");
            }
        }
        trace!("scope restored");
    }
}

impl Drop for ScopeFrame {
    fn drop(&mut self) {
        self.restore();
    }
}
