//! Function combinators: wrappers that change when and how often a function
//! runs, or what it is called with.
//!
//! Wrapped functions are [`Function`] values: variadic, thread-safe closures
//! over [`Value`](crate::value::Value) arguments. Every combinator accepts
//! `impl Into<Callable>`, so a plain value may be passed where a function is
//! expected; the wrapper then fails with
//! [`Error::InvalidCallable`](crate::Error::InvalidCallable) when invoked.
//!
//! - [`once`]: run at most once, remember the outcome
//! - [`negate`]: boolean complement of a predicate
//! - [`memoize`] / [`memoize_with`]: cache results by argument hash
//! - [`partial`] and the [`partial!`](crate::partial) macro: pre-bind
//!   arguments with `__` placeholders
//! - [`delay`]: run later on a [`Scheduler`]
//! - [`throttle`]: at most one run per window, with leading and trailing edges
//!
//! # Examples
//!
//! ```rust
//! use underbar::function::{Function, memoize, negate, once};
//! use underbar::partial;
//! use underbar::value::json;
//!
//! let divide = Function::new(|arguments| {
//!     let numerator = arguments[0].as_f64().unwrap_or(f64::NAN);
//!     let denominator = arguments[1].as_f64().unwrap_or(f64::NAN);
//!     json!(numerator / denominator)
//! });
//!
//! let half = partial!(divide.clone(), __, 2);
//! assert_eq!(half.call(&[json!(10)]), Ok(json!(5.0)));
//!
//! let cached = memoize(half.clone());
//! assert_eq!(cached.call(&[json!(8)]), Ok(json!(4.0)));
//! assert_eq!(cached.cache().len(), 1);
//!
//! let is_positive = Function::new(|arguments| json!(arguments[0].as_f64().unwrap_or(0.0) > 0.0));
//! assert_eq!(negate(is_positive).call(&[json!(-1)]), Ok(json!(true)));
//!
//! let first_only = once(divide);
//! assert_eq!(first_only.call(&[json!(9), json!(3)]), Ok(json!(3.0)));
//! assert_eq!(first_only.call(&[json!(1), json!(1)]), Ok(json!(3.0)));
//! ```

mod callable;
mod combinators;
mod memoize;
mod partial;
mod scheduler;
mod timing;

pub use callable::{Callable, Function};
pub use combinators::{negate, once};
pub use memoize::{Memoized, memoize, memoize_with};
pub use partial::{Argument, Placeholder, __, partial};
#[cfg(feature = "async")]
pub use scheduler::TokioScheduler;
pub use scheduler::{ManualScheduler, Scheduler, Task, TaskHandle, Wait};
pub use timing::{ThrottleOptions, Throttled, delay, throttle};
