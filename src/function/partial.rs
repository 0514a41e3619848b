//! Partial application with placeholder support.

use crate::value::Value;

use super::callable::{Callable, Function};

/// Placeholder marker type for partial application.
///
/// A placeholder in a bound argument list is filled, left to right, from
/// the arguments of each later call. It is a distinct type, so no real
/// argument value can ever be mistaken for it.
///
/// # Examples
///
/// ```
/// use underbar::function::{Argument, Function, __, partial};
/// use underbar::value::json;
///
/// let divide = Function::new(|arguments| {
///     json!(arguments[0].as_f64().unwrap_or(0.0) / arguments[1].as_f64().unwrap_or(1.0))
/// });
/// let half = partial(divide, vec![Argument::from(__), Argument::from(json!(2))]);
/// assert_eq!(half.call(&[json!(10)]), Ok(json!(5.0)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placeholder;

/// The placeholder constant for partial application.
///
/// The [`partial!`](crate::partial) macro matches `__` as a literal token, so
/// it does not need this constant to be imported.
pub const __: Placeholder = Placeholder;

/// One entry of a pre-bound argument list.
#[derive(Clone, Debug, PartialEq)]
pub enum Argument {
    /// A fixed value.
    Bound(Value),
    /// A slot filled from the next unused call argument.
    Placeholder,
}

impl From<Placeholder> for Argument {
    fn from(_: Placeholder) -> Self {
        Self::Placeholder
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Self::Bound(value)
    }
}

/// Partially applies `bound` to `function`.
///
/// At call time each [`Argument::Placeholder`] takes the next call argument
/// in order; call arguments left over once every placeholder is filled are
/// appended after the bound list. A placeholder with no call argument left
/// receives `null`.
///
/// The returned function does not change what `function` captured: a closure
/// bound to some context keeps that context however the wrapper is called.
///
/// # Errors
///
/// Calling the returned function fails with
/// [`Error::InvalidCallable`](crate::Error::InvalidCallable) when `function`
/// is not callable.
pub fn partial(function: impl Into<Callable>, bound: Vec<Argument>) -> Function {
    let callable = function.into();
    Function::fallible(move |arguments| {
        let function = callable.as_function()?;
        let mut remaining = arguments.iter().cloned();
        let mut assembled: Vec<Value> = bound
            .iter()
            .map(|argument| match argument {
                Argument::Bound(value) => value.clone(),
                Argument::Placeholder => remaining.next().unwrap_or(Value::Null),
            })
            .collect();
        assembled.extend(remaining);
        function.call(&assembled)
    })
}

/// Partially applies arguments to a function.
///
/// Use `__` (double underscore) as a placeholder for arguments that should
/// be supplied later. Every other argument is converted with
/// [`Value::from`](crate::value::Value).
///
/// **Important**: the `__` token is matched literally by the macro, so there
/// is no need to import [`__`](crate::function::__).
///
/// # Examples
///
/// ```
/// use underbar::partial;
/// use underbar::function::Function;
/// use underbar::value::json;
///
/// let describe = Function::new(|arguments| {
///     json!(arguments.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "))
/// });
///
/// let greet = partial!(describe, "hello", __, "!");
/// assert_eq!(greet.call(&[json!("world"), json!(1)]), Ok(json!("\"hello\" \"world\" \"!\" 1")));
/// ```
#[macro_export]
macro_rules! partial {
    (@arguments [$($collected:expr),*]) => {
        ::std::vec![$($collected),*]
    };

    (@arguments [$($collected:expr),*] __ $(, $($rest:tt)*)?) => {
        $crate::partial!(
            @arguments [$($collected,)* $crate::function::Argument::Placeholder]
            $($($rest)*)?
        )
    };

    (@arguments [$($collected:expr),*] $argument:expr $(, $($rest:tt)*)?) => {
        $crate::partial!(
            @arguments [$($collected,)* $crate::function::Argument::Bound($crate::value::Value::from($argument))]
            $($($rest)*)?
        )
    };

    ($function:expr $(, $($arguments:tt)*)?) => {
        $crate::function::partial($function, $crate::partial!(@arguments [] $($($arguments)*)?))
    };
}
