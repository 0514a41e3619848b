//! Dynamic values and the host conventions the rest of the crate relies on.
//!
//! Every operation in this crate consumes [`Value`], the JSON value model from
//! `serde_json` built with insertion-ordered objects. On top of it this module
//! defines:
//!
//! - [`Shape`]: the one classification of a value into ordered sequence,
//!   key-mapped structure, character sequence, or invalid
//! - [`Key`]: the positional or named context handed to iteratees
//! - [`strict_equals`], [`less_than`], [`truthy`] and [`to_number`]: equality,
//!   ordering and coercion rules shared by search, sorting and predicates
//!
//! # Examples
//!
//! ```rust
//! use underbar::value::{Shape, json, strict_equals};
//!
//! let list = json!([1, 2, 3]);
//! assert!(matches!(Shape::of(&list), Shape::Ordered(items) if items.len() == 3));
//! assert!(matches!(Shape::of(&json!(42)), Shape::Invalid));
//!
//! assert!(strict_equals(&json!(1), &json!(1.0)));
//! assert!(!strict_equals(&json!(1), &json!("1")));
//! ```

mod shape;

pub use serde_json::{Map, Value, json};
pub use shape::{Key, Shape};

use std::cmp::Ordering;

/// Returns whether two values are equal without any type coercion.
///
/// Numbers compare by numeric value, so `1` and `1.0` are equal. Arrays and
/// objects compare element-wise using the same rule.
pub fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => left.as_f64() == right.as_f64(),
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right)
                    .all(|(left, right)| strict_equals(left, right))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left.iter().all(|(key, left)| {
                    right
                        .get(key)
                        .is_some_and(|right| strict_equals(left, right))
                })
        }
        _ => left == right,
    }
}

/// Returns whether `left < right` under relational comparison.
///
/// Only number/number, string/string and bool/bool pairs are ordered. Every
/// other pair is "not less", which is what binary search relies on when it
/// meets values it cannot order.
pub fn less_than(left: &Value, right: &Value) -> bool {
    compare(left, right) == Some(Ordering::Less)
}

/// Compares two values of the same primitive kind.
///
/// Returns `None` for pairs that have no relational ordering.
pub fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => left.as_f64()?.partial_cmp(&right.as_f64()?),
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        (Value::Bool(left), Value::Bool(right)) => Some(left.cmp(right)),
        _ => None,
    }
}

/// Total order used when sorting values without a key function.
///
/// Values are grouped by kind (null, booleans, numbers, strings, arrays,
/// objects) and ordered naturally within a kind. Arrays and objects keep
/// their relative input order.
pub fn natural_order(left: &Value, right: &Value) -> Ordering {
    const fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    rank(left).cmp(&rank(right)).then_with(|| match (left, right) {
        (Value::Number(left), Value::Number(right)) => left
            .as_f64()
            .unwrap_or(f64::NAN)
            .total_cmp(&right.as_f64().unwrap_or(f64::NAN)),
        _ => compare(left, right).unwrap_or(Ordering::Equal),
    })
}

/// Returns the truthiness of a value.
///
/// `null`, `false`, `0` and the empty string are falsy. Every array and
/// object is truthy, including empty ones.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerces a value to a number.
///
/// `null` is `0`, booleans are `0` or `1`, strings are parsed after trimming
/// (the empty string is `0`). Anything that does not convert is `NaN`.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Renders a value as a property key.
///
/// Strings are used verbatim, everything else uses its JSON text. This is
/// the key space of memoization caches, so `1` and `"1"` share an entry.
pub fn property_key(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Looks up a named property of an object or an index of an array.
///
/// Array indices are given as decimal strings, the way keyed access names
/// them. Every other combination is a missing property.
pub fn property<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    match value {
        Value::Object(entries) => entries.get(name),
        Value::Array(items) => name.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}

/// Name of the kind of a value, used in error messages.
pub const fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
