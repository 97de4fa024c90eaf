//! Scoped rebinding for dynscope parameters
//!
//! This crate implements the scope rebinder:
//! - [`Binding`]: a parameter paired with its temporary value
//! - [`ScopeFrame`]: snapshot/apply on entry, restore on drop
//! - [`parameterize`] and friends: run a body under a frame
//!
//! Restoration is unconditional once a frame has taken its snapshots. It runs
//! on normal return, on a guard rejection partway through applying, on a body
//! error or panic, and when an async body's future is dropped.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binding;
pub mod frame;
pub mod rebind;

pub use binding::Binding;
pub use frame::ScopeFrame;
pub use rebind::{parameterize, parameterize_async, try_parameterize, try_parameterize_async};
