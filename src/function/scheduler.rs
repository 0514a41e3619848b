//! The "run this later" capability consumed by `delay` and `throttle`.
//!
//! A [`Scheduler`] runs a task once, no earlier than the requested duration.
//! It makes no ordering promise between unrelated tasks beyond their
//! durations, and it offers no cancellation: a [`TaskHandle`] only
//! identifies a task.
//!
//! Two implementations are provided:
//!
//! - [`TokioScheduler`] (feature `async`): timers on a tokio runtime
//! - [`ManualScheduler`]: a virtual clock advanced by hand, for tests

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::value::{Value, to_number};

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Identifies a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
    /// Allocates a fresh handle. Handles increase in allocation order.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The numeric identifier of the handle.
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Runs tasks after a delay.
pub trait Scheduler: Send + Sync {
    /// Schedules `task` to run once, no earlier than `after` from now.
    fn schedule(&self, after: Duration, task: Task) -> TaskHandle;
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
    fn schedule(&self, after: Duration, task: Task) -> TaskHandle {
        (**self).schedule(after, task)
    }
}

impl<S: Scheduler + ?Sized> Scheduler for &S {
    fn schedule(&self, after: Duration, task: Task) -> TaskHandle {
        (**self).schedule(after, task)
    }
}

/// A normalized wait duration.
///
/// Negative, `NaN` and non-numeric inputs normalize to zero, meaning "as
/// soon as possible". Plain numbers are milliseconds.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use underbar::function::Wait;
/// use underbar::value::json;
///
/// assert_eq!(Wait::from(20_u64).duration(), Duration::from_millis(20));
/// assert_eq!(Wait::from(-5.0).duration(), Duration::ZERO);
/// assert_eq!(Wait::from(&json!("15")).duration(), Duration::from_millis(15));
/// assert_eq!(Wait::from(&json!("soon")).duration(), Duration::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Wait(Duration);

impl Wait {
    /// The normalized duration.
    pub const fn duration(self) -> Duration {
        self.0
    }

    fn from_millis(milliseconds: f64) -> Self {
        if milliseconds.is_nan() || milliseconds <= 0.0 {
            return Self(Duration::ZERO);
        }
        Self(Duration::try_from_secs_f64(milliseconds / 1000.0).unwrap_or(Duration::MAX))
    }
}

impl From<Duration> for Wait {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl From<u64> for Wait {
    fn from(milliseconds: u64) -> Self {
        Self(Duration::from_millis(milliseconds))
    }
}

impl From<f64> for Wait {
    fn from(milliseconds: f64) -> Self {
        Self::from_millis(milliseconds)
    }
}

impl From<&Value> for Wait {
    fn from(milliseconds: &Value) -> Self {
        Self::from_millis(to_number(milliseconds))
    }
}

struct Pending {
    due: Duration,
    handle: TaskHandle,
    task: Task,
}

#[derive(Default)]
struct Timeline {
    now: Duration,
    pending: Vec<Pending>,
}

/// A scheduler driven by a virtual clock.
///
/// Nothing runs until [`ManualScheduler::advance`] moves the clock. Clones
/// share the same clock and queue.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::Duration;
/// use underbar::function::{ManualScheduler, Scheduler};
///
/// let scheduler = ManualScheduler::new();
/// let fired = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&fired);
/// scheduler.schedule(Duration::from_millis(10), Box::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// }));
///
/// scheduler.advance(Duration::from_millis(9));
/// assert_eq!(fired.load(Ordering::SeqCst), 0);
/// scheduler.advance(Duration::from_millis(1));
/// assert_eq!(fired.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone, Default)]
pub struct ManualScheduler {
    timeline: Arc<Mutex<Timeline>>,
}

impl ManualScheduler {
    /// Creates a scheduler whose clock starts at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.timeline.lock().now
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.timeline.lock().pending.len()
    }

    /// Moves the clock forward by `by`, running every task that falls due.
    ///
    /// Tasks run in due-time order, ties in scheduling order. Tasks scheduled
    /// by a running task are picked up in the same advance when they fall
    /// due before the new time. Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now().saturating_add(by);
        let mut ran = 0;
        loop {
            let next = {
                let mut timeline = self.timeline.lock();
                let earliest = timeline
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, pending)| pending.due <= target)
                    .min_by_key(|(_, pending)| (pending.due, pending.handle))
                    .map(|(position, _)| position);
                if let Some(position) = earliest {
                    let pending = timeline.pending.remove(position);
                    timeline.now = pending.due;
                    Some(pending.task)
                } else {
                    timeline.now = target;
                    None
                }
            };
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break ran,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, after: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle::next();
        let mut timeline = self.timeline.lock();
        let due = timeline.now.saturating_add(after);
        timeline.pending.push(Pending { due, handle, task });
        handle
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timeline = self.timeline.lock();
        formatter
            .debug_struct("ManualScheduler")
            .field("now", &timeline.now)
            .field("pending", &timeline.pending.len())
            .finish()
    }
}

#[cfg(feature = "async")]
pub use tokio_scheduler::TokioScheduler;

#[cfg(feature = "async")]
mod tokio_scheduler {
    use std::sync::LazyLock;
    use std::time::Duration;

    use tokio::runtime::{Builder, Handle, Runtime};

    use super::{Scheduler, Task, TaskHandle};

    /// Timer runtime used when scheduling from outside any tokio runtime.
    ///
    /// Built on first use and never dropped.
    static TIMER_RUNTIME: LazyLock<Runtime> = LazyLock::new(|| {
        Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("underbar-timer")
            .enable_time()
            .build()
            .expect("Failed to create timer tokio runtime")
    });

    /// A scheduler backed by tokio timers.
    ///
    /// Each task is spawned onto the runtime and runs after a
    /// `tokio::time::sleep`, so under a paused test clock tasks fire as the
    /// clock advances.
    #[derive(Debug, Clone)]
    pub struct TokioScheduler {
        handle: Handle,
    }

    impl TokioScheduler {
        /// Uses the current runtime when called inside one, otherwise a
        /// shared timer runtime.
        pub fn new() -> Self {
            let handle = Handle::try_current().unwrap_or_else(|_| TIMER_RUNTIME.handle().clone());
            Self { handle }
        }

        /// Schedules onto the runtime behind `handle`.
        pub const fn with_handle(handle: Handle) -> Self {
            Self { handle }
        }
    }

    impl Default for TokioScheduler {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Scheduler for TokioScheduler {
        fn schedule(&self, after: Duration, task: Task) -> TaskHandle {
            let handle = TaskHandle::next();
            self.handle.spawn(async move {
                tokio::time::sleep(after).await;
                task();
            });
            handle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wait_normalizes_bad_inputs_to_zero() {
        assert_eq!(Wait::from(f64::NAN).duration(), Duration::ZERO);
        assert_eq!(Wait::from(&json!(null)).duration(), Duration::ZERO);
        assert_eq!(Wait::from(&json!([1, 2])).duration(), Duration::ZERO);
        assert_eq!(Wait::from(f64::INFINITY).duration(), Duration::MAX);
    }

    #[test]
    fn manual_scheduler_runs_tasks_in_due_order() {
        let scheduler = ManualScheduler::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for (label, after) in [("late", 20), ("early", 5), ("tie", 5)] {
            let order = Arc::clone(&order);
            scheduler.schedule(
                Duration::from_millis(after),
                Box::new(move || order.lock().push(label)),
            );
        }
        assert_eq!(scheduler.advance(Duration::from_millis(30)), 3);
        assert_eq!(*order.lock(), vec!["early", "tie", "late"]);
        assert_eq!(scheduler.now(), Duration::from_millis(30));
    }

    #[test]
    fn advance_saturates_at_the_end_of_time() {
        let scheduler = ManualScheduler::new();
        let fired = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&fired);
        scheduler.schedule(Duration::MAX, Box::new(move || *counter.lock() += 1));

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(scheduler.advance(Duration::MAX), 1);
        assert_eq!(scheduler.now(), Duration::MAX);
        assert_eq!(*fired.lock(), 1);
    }

    #[test]
    fn tasks_scheduled_while_advancing_run_when_due() {
        let scheduler = ManualScheduler::new();
        let fired = Arc::new(Mutex::new(Vec::new()));
        let inner_scheduler = scheduler.clone();
        let inner_fired = Arc::clone(&fired);
        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                let at = inner_scheduler.now();
                inner_fired.lock().push(at);
                let nested_fired = Arc::clone(&inner_fired);
                let nested_scheduler = inner_scheduler.clone();
                inner_scheduler.schedule(
                    Duration::from_millis(10),
                    Box::new(move || nested_fired.lock().push(nested_scheduler.now())),
                );
            }),
        );
        scheduler.advance(Duration::from_millis(25));
        assert_eq!(
            *fired.lock(),
            vec![Duration::from_millis(10), Duration::from_millis(20)]
        );
        assert_eq!(scheduler.pending(), 0);
    }
}
