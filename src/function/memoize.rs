//! Memoization with an inspectable, unbounded cache.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use serde_json::Map;

use crate::error::Result;
use crate::value::{Value, property_key};

use super::callable::{Callable, Function};

/// A memoized function.
///
/// Results are cached under the property key of a hash computed from the
/// arguments (by default the first argument). The cache is owned by this
/// wrapper and its clones, and it is never evicted.
///
/// # Examples
///
/// ```rust
/// use underbar::function::{Function, memoize};
/// use underbar::value::json;
///
/// let square = memoize(Function::new(|arguments| {
///     let number = arguments[0].as_i64().unwrap_or(0);
///     json!(number * number)
/// }));
///
/// assert_eq!(square.call(&[json!(4)]), Ok(json!(16)));
/// assert_eq!(square.cache().get("4"), Some(&json!(16)));
/// ```
#[derive(Clone)]
pub struct Memoized {
    function: Callable,
    hasher: Option<Callable>,
    cache: Arc<Mutex<Map<String, Value>>>,
}

impl Memoized {
    /// Returns the cached result for these arguments, computing it on a miss.
    ///
    /// The lock on the cache is not held while `function` runs, so a
    /// memoized function may call itself recursively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCallable`](crate::Error::InvalidCallable) when
    /// the wrapped function or the hash function is not callable, or the
    /// error produced by either of them.
    pub fn call(&self, arguments: &[Value]) -> Result<Value> {
        let function = self.function.as_function()?;
        let key = match &self.hasher {
            Some(hasher) => property_key(&hasher.call(arguments)?),
            None => arguments
                .first()
                .map_or_else(|| "undefined".to_owned(), property_key),
        };

        if let Some(hit) = self.cache.lock().get(&key).cloned() {
            tracing::trace!(key = %key, "memoize hit");
            return Ok(hit);
        }

        tracing::debug!(key = %key, "memoize miss");
        let result = function.call(arguments)?;
        self.cache.lock().insert(key, result.clone());
        Ok(result)
    }

    /// Locks and returns the cache for inspection.
    ///
    /// Calling the memoized function while the guard is alive deadlocks.
    pub fn cache(&self) -> MutexGuard<'_, Map<String, Value>> {
        self.cache.lock()
    }
}

impl fmt::Debug for Memoized {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Memoized")
            .field("function", &self.function)
            .field("cached", &self.cache.lock().len())
            .finish_non_exhaustive()
    }
}

impl From<Memoized> for Function {
    fn from(memoized: Memoized) -> Self {
        Self::fallible(move |arguments| memoized.call(arguments))
    }
}

impl From<Memoized> for Callable {
    fn from(memoized: Memoized) -> Self {
        Self::Function(memoized.into())
    }
}

/// Memoizes `function`, keying the cache by its first argument.
pub fn memoize(function: impl Into<Callable>) -> Memoized {
    Memoized {
        function: function.into(),
        hasher: None,
        cache: Arc::new(Mutex::new(Map::new())),
    }
}

/// Memoizes `function`, keying the cache by the result of `hasher`.
///
/// `hasher` receives the same arguments as `function`.
///
/// # Examples
///
/// ```rust
/// use underbar::function::{Function, memoize_with};
/// use underbar::value::json;
///
/// let add = memoize_with(
///     Function::new(|arguments| json!(arguments[0].as_i64().unwrap_or(0) + arguments[1].as_i64().unwrap_or(0))),
///     Function::new(|arguments| json!(format!("{}+{}", arguments[0], arguments[1]))),
/// );
/// assert_eq!(add.call(&[json!(1), json!(2)]), Ok(json!(3)));
/// assert!(add.cache().contains_key("1+2"));
/// ```
pub fn memoize_with(function: impl Into<Callable>, hasher: impl Into<Callable>) -> Memoized {
    Memoized {
        function: function.into(),
        hasher: Some(hasher.into()),
        cache: Arc::new(Mutex::new(Map::new())),
    }
}
