//! Dynamically typed functions and the values supplied in their place.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value::{Key, Value};

type Body = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// A cloneable, thread-safe handle to a variadic function over values.
///
/// Clones share the same underlying closure, so any state the closure owns
/// (a memoization cache, a once-flag) is shared between them.
///
/// # Examples
///
/// ```rust
/// use underbar::function::Function;
/// use underbar::value::json;
///
/// let add = Function::new(|arguments| {
///     json!(arguments.iter().filter_map(|argument| argument.as_i64()).sum::<i64>())
/// });
/// assert_eq!(add.call(&[json!(1), json!(2)]), Ok(json!(3)));
/// ```
#[derive(Clone)]
pub struct Function(Arc<Body>);

impl Function {
    /// Wraps an infallible closure.
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(move |arguments: &[Value]| -> Result<Value> {
            Ok(body(arguments))
        }))
    }

    /// Wraps a closure that can fail.
    pub fn fallible<F>(body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(body))
    }

    /// Invokes the function.
    ///
    /// # Errors
    ///
    /// Returns whatever error the wrapped closure produces.
    pub fn call(&self, arguments: &[Value]) -> Result<Value> {
        (self.0)(arguments)
    }

    /// Returns `true` when both handles share the same closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Function(..)")
    }
}

/// Whatever a caller supplied where a function was expected.
///
/// Operations that require a function accept `impl Into<Callable>`, so both
/// a [`Function`] and an arbitrary [`Value`] can be passed. Invoking the
/// latter fails with [`Error::InvalidCallable`].
///
/// # Examples
///
/// ```rust
/// use underbar::Error;
/// use underbar::function::Callable;
/// use underbar::value::json;
///
/// let not_a_function = Callable::from(json!("print"));
/// assert_eq!(
///     not_a_function.call(&[]),
///     Err(Error::InvalidCallable { found: "string" })
/// );
/// ```
#[derive(Debug, Clone)]
pub enum Callable {
    /// A function that can be invoked.
    Function(Function),
    /// A value that cannot be invoked.
    Uncallable(Value),
}

impl Callable {
    /// Returns the function, or an error when the value is not callable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCallable`] for [`Callable::Uncallable`].
    pub fn as_function(&self) -> Result<&Function> {
        match self {
            Self::Function(function) => Ok(function),
            Self::Uncallable(value) => Err(Error::invalid_callable(value)),
        }
    }

    /// Invokes the function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCallable`] for [`Callable::Uncallable`], or
    /// the error produced by the function itself.
    pub fn call(&self, arguments: &[Value]) -> Result<Value> {
        self.as_function()?.call(arguments)
    }

    /// Adapts the function into an iteratee for
    /// [`try_each`](crate::collection::try_each).
    ///
    /// The function receives `[value, key, collection]`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidCallable`] before any element is visited
    /// when the value is not callable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use underbar::Error;
    /// use underbar::collection::try_each;
    /// use underbar::function::{Callable, Function};
    /// use underbar::value::json;
    ///
    /// let not_callable = Callable::from(json!(null));
    /// assert!(matches!(not_callable.iteratee(), Err(Error::InvalidCallable { .. })));
    ///
    /// let upper = Callable::from(Function::new(|arguments| {
    ///     json!(arguments[0].as_str().unwrap_or_default().to_uppercase())
    /// }));
    /// let list = json!(["a", "b"]);
    /// assert!(try_each(&list, upper.iteratee()?).is_ok());
    /// # Ok::<(), Error>(())
    /// ```
    pub fn iteratee(
        &self,
    ) -> Result<impl FnMut(&Value, Key<'_>, &Value) -> Result<Value> + '_> {
        let function = self.as_function()?;
        Ok(move |value: &Value, key: Key<'_>, collection: &Value| {
            function.call(&[value.clone(), key.to_value(), collection.clone()])
        })
    }

    /// Adapts the function into a reducer for
    /// [`try_reduce`](crate::collection::try_reduce).
    ///
    /// The function receives `[memo, value, key, collection]`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidCallable`] when the value is not callable.
    pub fn reducer(
        &self,
    ) -> Result<impl FnMut(Value, &Value, Key<'_>, &Value) -> Result<Value> + '_> {
        let function = self.as_function()?;
        Ok(
            move |memo: Value, value: &Value, key: Key<'_>, collection: &Value| {
                function.call(&[memo, value.clone(), key.to_value(), collection.clone()])
            },
        )
    }
}

impl From<Function> for Callable {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<Value> for Callable {
    fn from(value: Value) -> Self {
        Self::Uncallable(value)
    }
}
