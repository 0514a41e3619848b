//! # underbar
//!
//! A functional utility belt for dynamically shaped data.
//!
//! ## Overview
//!
//! Every operation works on [`value::Value`], a JSON-style dynamic value.
//! Collection operations classify their input once (ordered sequence,
//! key-mapped structure, character sequence, or invalid) and degrade to a
//! documented default for shapes they cannot work with instead of failing.
//!
//! - **Collections**: iteration, search, membership, set algebra, sorting
//! - **Objects**: `extend` and `defaults` property merging
//! - **Functions**: `once`, `negate`, `memoize`, `partial`, `delay`, `throttle`
//!
//! ## Feature Flags
//!
//! - `collection`: collection operations
//! - `object`: object merging
//! - `function`: function combinators and the scheduler abstraction
//! - `async`: a tokio-backed scheduler
//! - `serde`: serialization of [`function::ThrottleOptions`]
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! use underbar::prelude::*;
//!
//! let people = json!([
//!     {"name": "moe", "age": 40},
//!     {"name": "larry", "age": 50},
//!     {"name": "curly", "age": 60},
//! ]);
//!
//! let names = pluck(&people, "name");
//! assert_eq!(names[0], Some(json!("moe")));
//!
//! let youngest_first = sort_by_property(&people, "age");
//! assert_eq!(youngest_first[0]["name"], json!("moe"));
//!
//! assert!(contains(&json!([1, 2, 3]), &json!(3)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the value model and every enabled operation.
///
/// # Usage
///
/// ```rust
/// use underbar::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::value::{Key, Shape, Value, json};

    #[cfg(feature = "collection")]
    pub use crate::collection::*;

    #[cfg(feature = "object")]
    pub use crate::object::*;

    #[cfg(feature = "function")]
    pub use crate::function::*;
}

pub mod error;
pub mod value;

pub use error::{Error, Result};

#[cfg(feature = "collection")]
pub mod collection;

#[cfg(feature = "object")]
pub mod object;

#[cfg(feature = "function")]
pub mod function;
