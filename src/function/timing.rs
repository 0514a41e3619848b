//! Deferred invocation and throttling.
//!
//! Both combinators hand their timers to a [`Scheduler`]. Failures of calls
//! that run later on the scheduler cannot reach the original caller; they
//! are logged at `warn` level and dropped.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::Result;
use crate::value::Value;

use super::callable::{Callable, Function};
use super::scheduler::{Scheduler, TaskHandle, Wait};

/// Calls `function` with `arguments` once `wait` has elapsed.
///
/// `wait` is normalized by [`Wait`], so a negative or non-numeric wait
/// fires as soon as possible. Returns immediately with the handle of the
/// scheduled task.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::time::Duration;
/// use parking_lot::Mutex;
/// use underbar::function::{Function, ManualScheduler, delay};
/// use underbar::value::{Value, json};
///
/// let scheduler = ManualScheduler::new();
/// let received = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&received);
/// let record = Function::new(move |arguments| {
///     sink.lock().extend_from_slice(arguments);
///     Value::Null
/// });
///
/// delay(&scheduler, record, 50_u64, vec![json!("late")]);
/// assert!(received.lock().is_empty());
///
/// scheduler.advance(Duration::from_millis(50));
/// assert_eq!(*received.lock(), vec![json!("late")]);
/// ```
pub fn delay<S>(
    scheduler: &S,
    function: impl Into<Callable>,
    wait: impl Into<Wait>,
    arguments: Vec<Value>,
) -> TaskHandle
where
    S: Scheduler + ?Sized,
{
    let function = function.into();
    let wait = wait.into().duration();
    tracing::debug!(wait = ?wait, "scheduling delayed call");
    scheduler.schedule(
        wait,
        Box::new(move || {
            if let Err(error) = function.call(&arguments) {
                tracing::warn!(%error, "delayed call failed");
            }
        }),
    )
}

/// Edge policy of a throttled function.
///
/// # Examples
///
/// ```rust
/// use underbar::function::ThrottleOptions;
///
/// let options = ThrottleOptions::default().with_leading(false);
/// assert!(!options.leading);
/// assert!(options.trailing);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ThrottleOptions {
    /// Invoke on the first call of a window.
    ///
    /// When disabled, that call is deferred to the end of the window.
    pub leading: bool,
    /// Invoke once more at the end of a window if calls arrived during it.
    pub trailing: bool,
}

impl ThrottleOptions {
    /// Sets the leading-edge policy.
    #[must_use]
    pub const fn with_leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    /// Sets the trailing-edge policy.
    #[must_use]
    pub const fn with_trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }
}

impl Default for ThrottleOptions {
    fn default() -> Self {
        Self {
            leading: true,
            trailing: true,
        }
    }
}

/// State of a throttled function between calls.
#[derive(Debug, Clone, PartialEq)]
enum ThrottleState {
    /// No window is open; the next call starts one.
    Idle,
    /// A window is open. `pending` holds the arguments of the call to make
    /// when it closes; a newer call replaces them.
    Cooling { pending: Option<Vec<Value>> },
}

struct Throttle<S> {
    function: Callable,
    wait: Duration,
    options: ThrottleOptions,
    scheduler: S,
    state: Mutex<ThrottleState>,
}

impl<S: Scheduler + 'static> Throttle<S> {
    fn open_window(this: &Arc<Self>) {
        let window = Arc::downgrade(this);
        this.scheduler.schedule(
            this.wait,
            Box::new(move || {
                if let Some(window) = window.upgrade() {
                    Self::close_window(&window);
                }
            }),
        );
    }

    fn close_window(this: &Arc<Self>) {
        let pending = {
            let mut state = this.state.lock();
            let pending = match &mut *state {
                ThrottleState::Cooling { pending } => pending.take(),
                ThrottleState::Idle => None,
            };
            if pending.is_none() {
                *state = ThrottleState::Idle;
                tracing::debug!("throttle window closed");
            }
            pending
        };

        if let Some(arguments) = pending {
            tracing::debug!("throttle trailing call");
            if let Err(error) = this.function.call(&arguments) {
                tracing::warn!(%error, "throttled trailing call failed");
            }
            Self::open_window(this);
        }
    }
}

/// A throttled function: invoked at most once per window.
///
/// Created by [`throttle`]. Clones share the same state.
pub struct Throttled<S> {
    inner: Arc<Throttle<S>>,
}

impl<S> Clone for Throttled<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Scheduler + 'static> Throttled<S> {
    /// Calls the throttled function.
    ///
    /// Returns `Ok(Some(result))` when the function ran immediately and
    /// `Ok(None)` when the call was deferred to the end of the window or
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns the error of an immediate invocation, including
    /// [`Error::InvalidCallable`](crate::Error::InvalidCallable) when the
    /// throttled value is not callable.
    pub fn call(&self, arguments: Vec<Value>) -> Result<Option<Value>> {
        let inner = &self.inner;
        let mut state = inner.state.lock();

        if let ThrottleState::Cooling { pending } = &mut *state {
            if inner.options.trailing {
                tracing::debug!("throttle deferred call to trailing edge");
                *pending = Some(arguments);
            } else {
                tracing::debug!("throttle dropped call during window");
            }
            return Ok(None);
        }

        if inner.options.leading {
            *state = ThrottleState::Cooling { pending: None };
            drop(state);
            tracing::debug!("throttle leading call");
            let outcome = inner.function.call(&arguments);
            Throttle::open_window(inner);
            outcome.map(Some)
        } else {
            *state = ThrottleState::Cooling {
                pending: Some(arguments),
            };
            drop(state);
            tracing::debug!("throttle deferred leading call");
            Throttle::open_window(inner);
            Ok(None)
        }
    }

    /// Returns `true` while a window is open.
    pub fn is_cooling(&self) -> bool {
        matches!(*self.inner.state.lock(), ThrottleState::Cooling { .. })
    }

    /// Returns `true` when a call is waiting for the end of the window.
    pub fn has_pending(&self) -> bool {
        matches!(
            *self.inner.state.lock(),
            ThrottleState::Cooling { pending: Some(_) }
        )
    }
}

impl<S> fmt::Debug for Throttled<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Throttled")
            .field("wait", &self.inner.wait)
            .field("options", &self.inner.options)
            .field("state", &*self.inner.state.lock())
            .finish_non_exhaustive()
    }
}

impl<S: Scheduler + 'static> From<Throttled<S>> for Function {
    fn from(throttled: Throttled<S>) -> Self {
        Self::fallible(move |arguments| {
            throttled
                .call(arguments.to_vec())
                .map(Option::unwrap_or_default)
        })
    }
}

/// Throttles `function` to at most one invocation per `wait`.
///
/// The first call of a window invokes immediately. With `leading` disabled
/// it becomes the pending call instead, whatever `trailing` says. Calls
/// during the window replace the pending call when `trailing` is enabled and
/// are dropped otherwise. When the window closes a pending call is invoked
/// with the latest arguments and a new window opens; with nothing pending
/// the throttle goes idle.
///
/// Scheduled window timers hold only a weak reference to the throttle. Once
/// every [`Throttled`] handle is dropped, a window that closes later does
/// nothing and its pending call is discarded.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::Duration;
/// use underbar::function::{Function, ManualScheduler, ThrottleOptions, throttle};
/// use underbar::value::Value;
///
/// let scheduler = ManualScheduler::new();
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&calls);
/// let throttled = throttle(
///     scheduler.clone(),
///     Function::new(move |_| {
///         counter.fetch_add(1, Ordering::SeqCst);
///         Value::Null
///     }),
///     20_u64,
///     ThrottleOptions::default(),
/// );
///
/// throttled.call(vec![]).unwrap();
/// throttled.call(vec![]).unwrap();
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
///
/// scheduler.advance(Duration::from_millis(20));
/// assert_eq!(calls.load(Ordering::SeqCst), 2);
/// ```
pub fn throttle<S>(
    scheduler: S,
    function: impl Into<Callable>,
    wait: impl Into<Wait>,
    options: ThrottleOptions,
) -> Throttled<S>
where
    S: Scheduler + 'static,
{
    Throttled {
        inner: Arc::new(Throttle {
            function: function.into(),
            wait: wait.into().duration(),
            options,
            scheduler,
            state: Mutex::new(ThrottleState::Idle),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::ManualScheduler;
    use serde_json::json;

    fn recorder() -> (Function, Arc<Mutex<Vec<Vec<Value>>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let function = Function::new(move |arguments| {
            sink.lock().push(arguments.to_vec());
            Value::Null
        });
        (function, calls)
    }

    #[test]
    fn trailing_call_uses_latest_arguments() {
        let scheduler = ManualScheduler::new();
        let (function, calls) = recorder();
        let throttled = throttle(scheduler.clone(), function, 10_u64, ThrottleOptions::default());

        throttled.call(vec![json!(1)]).unwrap();
        throttled.call(vec![json!(2)]).unwrap();
        throttled.call(vec![json!(3)]).unwrap();
        assert!(throttled.has_pending());

        scheduler.advance(Duration::from_millis(10));
        assert_eq!(*calls.lock(), vec![vec![json!(1)], vec![json!(3)]]);
        assert!(throttled.is_cooling());

        scheduler.advance(Duration::from_millis(10));
        assert!(!throttled.is_cooling());
    }

    #[test]
    fn leading_disabled_defers_first_call_even_without_trailing() {
        let scheduler = ManualScheduler::new();
        let (function, calls) = recorder();
        let options = ThrottleOptions::default()
            .with_leading(false)
            .with_trailing(false);
        let throttled = throttle(scheduler.clone(), function, 10_u64, options);

        assert!(throttled.call(vec![json!(1)]).unwrap().is_none());
        assert!(throttled.has_pending());
        scheduler.advance(Duration::from_millis(10));
        assert_eq!(*calls.lock(), vec![vec![json!(1)]]);
    }

    #[test]
    fn leading_disabled_defers_first_call() {
        let scheduler = ManualScheduler::new();
        let (function, calls) = recorder();
        let options = ThrottleOptions::default().with_leading(false);
        let throttled = throttle(scheduler.clone(), function, 10_u64, options);

        assert_eq!(throttled.call(vec![json!("a")]), Ok(None));
        assert!(calls.lock().is_empty());

        scheduler.advance(Duration::from_millis(10));
        assert_eq!(*calls.lock(), vec![vec![json!("a")]]);
    }

    #[test]
    fn trailing_disabled_drops_calls_during_window() {
        let scheduler = ManualScheduler::new();
        let (function, calls) = recorder();
        let options = ThrottleOptions::default().with_trailing(false);
        let throttled = throttle(scheduler.clone(), function, 10_u64, options);

        throttled.call(vec![json!(1)]).unwrap();
        throttled.call(vec![json!(2)]).unwrap();
        scheduler.advance(Duration::from_millis(30));
        assert_eq!(*calls.lock(), vec![vec![json!(1)]]);
        assert!(!throttled.is_cooling());
    }

    #[test]
    fn uncallable_fails_on_the_leading_call() {
        let scheduler = ManualScheduler::new();
        let throttled = throttle(scheduler, json!(1), 10_u64, ThrottleOptions::default());
        assert!(throttled.call(vec![]).is_err());
    }
}
