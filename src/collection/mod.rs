//! Collection operations over ordered sequences, keyed structures and
//! character sequences.
//!
//! Every operation takes a [`Value`](crate::value::Value) and classifies it
//! with [`Shape::of`](crate::value::Shape::of). Shapes an operation cannot
//! work with are never errors: each operation documents its own default
//! (an empty vector, `None`, `0`, or the input unchanged), and those defaults
//! intentionally differ between operations.
//!
//! # Overview
//!
//! - Iteration: [`each`], [`each_with`], [`try_each`], [`map`], [`filter`],
//!   [`reject`], [`every`], [`some`], [`reduce`], [`try_reduce`], [`pluck`],
//!   [`where_matching`], [`values`], [`identity`]
//! - Access: [`first`], [`first_n`], [`last`], [`last_n`], [`shuffle`]
//! - Search and membership: [`index_of`], [`contains`], [`uniq`],
//!   [`sorted_index`]
//! - Set algebra: [`flatten`], [`intersection`], [`difference`], [`zip`]
//! - Ordering: [`sort`], [`sort_by`], [`sort_by_property`]
//!
//! # Examples
//!
//! ```rust
//! use underbar::collection::{filter, map, uniq};
//! use underbar::value::json;
//!
//! let list = json!([1, 2, 3, 2, 3]);
//!
//! let odd = filter(&list, |value, _, _| value.as_i64().unwrap_or(0) % 2 == 1);
//! assert_eq!(odd, vec![json!(1), json!(3), json!(3)]);
//!
//! let unique = uniq(&list, false);
//! assert_eq!(unique, vec![json!(1), json!(2), json!(3)]);
//!
//! let indices = map(&json!({"a": 1, "b": 2}), |_, key, _| key.to_string());
//! assert_eq!(indices, vec!["a", "b"]);
//! ```

mod access;
mod iteration;
mod ordering;
mod search;
mod set;

pub use access::{first, first_n, last, last_n, shuffle, shuffle_with};
pub use iteration::{
    each, each_with, every, filter, identity, map, pluck, reduce, reject, some, try_each,
    try_reduce, values, where_matching,
};
pub use ordering::{sort, sort_by, sort_by_property};
pub use search::{
    SearchMode, contains, contains_from, index_of, sorted_index, sorted_index_by,
    sorted_index_by_property, uniq, uniq_inspect,
};
pub use set::{difference, flatten, intersection, zip};
