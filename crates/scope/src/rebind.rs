//! The `parameterize` family
//!
//! Each entry point enters a [`ScopeFrame`], runs the body, and lets the frame
//! restore. They differ only in how the body reports its outcome:
//!
//! | Function | Body | Returns |
//! |----------|------|---------|
//! | [`parameterize`] | `FnOnce() -> R` | `Result<R>` |
//! | [`try_parameterize`] | `FnOnce() -> Result<R, E>` | `Result<R, E>` |
//! | [`parameterize_async`] | `FnOnce() -> impl Future<Output = R>` | `Result<R>` |
//! | [`try_parameterize_async`] | `FnOnce() -> impl Future<Output = Result<R, E>>` | `Result<R, E>` |
//!
//! ## Visibility
//!
//! Parameters are shared cells, not thread- or task-local slots. While a
//! scope is active every reader of the parameter sees the rebound value,
//! including other threads and other tasks. Flows that need isolation must
//! not share parameters, or must serialize their scopes.

use crate::binding::Binding;
use crate::frame::ScopeFrame;
use dynscope_core::{Error, Result};
use std::future::Future;

/// Run `body` with `bindings` in effect, then restore.
///
/// ```ignore
/// let n = make_parameter(1i64)?;
/// let doubled = parameterize([(&n, 100)], || n.get() * 2)?;
/// assert_eq!(doubled, 200);
/// assert_eq!(n.get(), 1);
/// ```
///
/// # Errors
///
/// - `InvalidArgument` if a binding's value does not fit its parameter;
///   nothing is mutated.
/// - `Validation` if a guard rejects a bound value; every parameter is
///   restored and the body does not run.
///
/// If `body` panics, the parameters are restored while unwinding.
pub fn parameterize<I, B, F, R>(bindings: I, body: F) -> Result<R>
where
    I: IntoIterator<Item = B>,
    B: Into<Binding>,
    F: FnOnce() -> R,
{
    let frame = ScopeFrame::enter(bindings)?;
    let out = body();
    frame.exit();
    Ok(out)
}

/// Like [`parameterize`] for a fallible body.
///
/// Binding errors are converted into `E`; the body's own error is returned
/// after the parameters are restored.
pub fn try_parameterize<I, B, F, R, E>(bindings: I, body: F) -> std::result::Result<R, E>
where
    I: IntoIterator<Item = B>,
    B: Into<Binding>,
    F: FnOnce() -> std::result::Result<R, E>,
    E: From<Error>,
{
    let frame = ScopeFrame::enter(bindings)?;
    let out = body();
    frame.exit();
    out
}

/// Run an asynchronous body with `bindings` in effect.
///
/// The bindings are applied when the returned future is first polled and stay
/// in effect across every suspension point of the body. If the future is
/// dropped before completing, the parameters are restored at drop.
pub async fn parameterize_async<I, B, F, Fut>(bindings: I, body: F) -> Result<Fut::Output>
where
    I: IntoIterator<Item = B>,
    B: Into<Binding>,
    F: FnOnce() -> Fut,
    Fut: Future,
{
    let frame = ScopeFrame::enter(bindings)?;
    let out = body().await;
    frame.exit();
    Ok(out)
}

/// Like [`parameterize_async`] for a fallible body.
pub async fn try_parameterize_async<I, B, F, Fut, R, E>(
    bindings: I,
    body: F,
) -> std::result::Result<R, E>
where
    I: IntoIterator<Item = B>,
    B: Into<Binding>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = std::result::Result<R, E>>,
    E: From<Error>,
{
    let frame = ScopeFrame::enter(bindings)?;
    let out = body().await;
    frame.exit();
    out
}
