//! Error type shared by every fallible operation.
//!
//! Shape mismatches are never errors: each collection operation degrades to
//! its own documented default. The only hard failure is a non-callable value
//! supplied where a function is required.

use thiserror::Error;

use crate::value::{Value, kind_name};

/// Errors produced by this crate.
///
/// # Examples
///
/// ```rust
/// use underbar::Error;
/// use underbar::value::json;
///
/// let error = Error::invalid_callable(&json!(42));
/// assert_eq!(error.to_string(), "expected a callable, found number");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A value that cannot be invoked was supplied where a function was required.
    #[error("expected a callable, found {found}")]
    InvalidCallable {
        /// Kind of the value that was supplied.
        found: &'static str,
    },
}

impl Error {
    /// Builds an [`Error::InvalidCallable`] describing `value`.
    pub const fn invalid_callable(value: &Value) -> Self {
        Self::InvalidCallable {
            found: kind_name(value),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
