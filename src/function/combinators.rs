//! One-shot invocation and predicate negation.

use parking_lot::Mutex;

use crate::error::Result;
use crate::value::{Value, truthy};

use super::callable::{Callable, Function};

enum OnceState {
    Ready(Callable),
    Running,
    Done(Result<Value>),
}

/// Returns a function that invokes `function` only on its first call.
///
/// The first outcome (value or error) is remembered and returned by every
/// later call, whatever arguments they pass. A call made while the first one
/// is still running returns `null`.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use underbar::function::{Function, once};
/// use underbar::value::json;
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&calls);
/// let initialize = once(Function::new(move |arguments| {
///     counter.fetch_add(1, Ordering::SeqCst);
///     arguments[0].clone()
/// }));
///
/// assert_eq!(initialize.call(&[json!("first")]), Ok(json!("first")));
/// assert_eq!(initialize.call(&[json!("second")]), Ok(json!("first")));
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
pub fn once(function: impl Into<Callable>) -> Function {
    let state = Mutex::new(OnceState::Ready(function.into()));
    Function::fallible(move |arguments| {
        let mut guard = state.lock();
        if let OnceState::Done(outcome) = &*guard {
            return outcome.clone();
        }
        let OnceState::Ready(callable) = std::mem::replace(&mut *guard, OnceState::Running) else {
            return Ok(Value::Null);
        };
        drop(guard);

        let outcome = callable.call(arguments);
        *state.lock() = OnceState::Done(outcome.clone());
        outcome
    })
}

/// Returns a function computing the boolean complement of `predicate`.
///
/// Arguments are forwarded unchanged and the result is interpreted with
/// [`truthy`].
///
/// # Examples
///
/// ```rust
/// use underbar::function::{Function, negate};
/// use underbar::value::json;
///
/// let is_even = Function::new(|arguments| json!(arguments[0].as_i64().unwrap_or(1) % 2 == 0));
/// let is_odd = negate(is_even);
/// assert_eq!(is_odd.call(&[json!(3)]), Ok(json!(true)));
/// ```
pub fn negate(predicate: impl Into<Callable>) -> Function {
    let predicate = predicate.into();
    Function::fallible(move |arguments| Ok(Value::Bool(!truthy(&predicate.call(arguments)?))))
}
